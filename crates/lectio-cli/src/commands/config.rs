//! Configuration command.

use clap::Subcommand;

use lectio_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the vault root directory
    SetVault { path: String },
    /// Set reading defaults
    SetReading {
        /// Pages per hour
        #[arg(long)]
        speed: Option<f64>,
        /// Target pages per session
        #[arg(long)]
        target_pages: Option<u32>,
    },
    /// Set review defaults
    SetReview {
        /// Sessions per day
        #[arg(long)]
        sessions_per_day: Option<u32>,
        /// Session length in minutes
        #[arg(long)]
        duration: Option<u32>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("vault: {}", config.vault_path().display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetVault { path } => {
            let mut config = Config::load_or_default();
            config.vault_path = Some(path);
            config.save()?;
            println!("vault set to {}", config.vault_path().display());
        }
        ConfigAction::SetReading {
            speed,
            target_pages,
        } => {
            let mut config = Config::load_or_default();
            if let Some(speed) = speed {
                config.reading.reading_speed_pages_hour = speed;
            }
            if let Some(target) = target_pages {
                config.reading.target_pages_per_session = target;
            }
            config.save()?;
            println!(
                "reading: {} pages/hour, {} pages/session",
                config.reading.reading_speed_pages_hour,
                config.reading.target_pages_per_session
            );
        }
        ConfigAction::SetReview {
            sessions_per_day,
            duration,
        } => {
            let mut config = Config::load_or_default();
            if let Some(sessions) = sessions_per_day {
                config.review.sessions_per_day = sessions;
            }
            if let Some(duration) = duration {
                config.review.session_duration_minutes = duration;
            }
            config.save()?;
            println!(
                "review: {} session(s)/day, {} minutes each",
                config.review.sessions_per_day, config.review.session_duration_minutes
            );
        }
    }

    Ok(())
}
