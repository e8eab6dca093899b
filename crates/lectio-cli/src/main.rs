use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lectio", version, about = "Lectio reading planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate reading time into candidate slots
    Allocate {
        #[command(flatten)]
        args: commands::allocate::AllocateArgs,
    },
    /// Review planning
    Review {
        #[command(subcommand)]
        action: commands::review::ReviewAction,
    },
    /// Estimate text difficulty
    Difficulty {
        #[command(flatten)]
        args: commands::difficulty::DifficultyArgs,
    },
    /// Preference document management
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Productivity patterns and schedule optimization
    Patterns {
        #[command(subcommand)]
        action: commands::patterns::PatternsAction,
    },
    /// Record feedback into the learning history
    Record {
        #[command(subcommand)]
        action: commands::record::RecordAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Allocate { args } => commands::allocate::run(args),
        Commands::Review { action } => commands::review::run(action),
        Commands::Difficulty { args } => commands::difficulty::run(args),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Patterns { action } => commands::patterns::run(action),
        Commands::Record { action } => commands::record::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
