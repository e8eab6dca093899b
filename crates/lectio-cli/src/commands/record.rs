//! Record commands: feed session outcomes back into the learning history.

use clap::Subcommand;

use lectio_core::{Config, PreferenceStore};

#[derive(Subcommand)]
pub enum RecordAction {
    /// Record a productivity score (0-1) for the session just finished
    Score { value: f64 },
    /// Record a difficulty delta (positive: harder than estimated)
    Difficulty { value: f64 },
}

pub fn run(action: RecordAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = PreferenceStore::open(config.vault_path());

    match action {
        RecordAction::Score { value } => {
            store.record_session_score(value)?;
            println!("Recorded session score {value}.");
        }
        RecordAction::Difficulty { value } => {
            store.record_difficulty_feedback(value)?;
            println!("Recorded difficulty delta {value}.");
        }
    }
    println!("History entries: {}", store.history().len());

    Ok(())
}
