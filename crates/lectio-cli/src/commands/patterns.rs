//! Pattern commands: show learned hour weights, reorder schedules,
//! re-derive the difficulty multiplier.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::Value;

use lectio_core::{Config, PreferenceStore};

#[derive(Subcommand)]
pub enum PatternsAction {
    /// Show detected per-hour productivity patterns
    Show {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Reorder a schedule (JSON array of events) by hour weights
    Optimize {
        /// JSON file with the schedule to reorder
        #[arg(long)]
        schedule: PathBuf,
    },
    /// Re-derive the difficulty multiplier from recent feedback
    Adjust,
}

pub fn run(action: PatternsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = PreferenceStore::open(config.vault_path());

    match action {
        PatternsAction::Show { json } => {
            let patterns = store.detect_patterns();
            if json {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
                return Ok(());
            }
            if let Some(message) = &patterns.message {
                println!("{message}");
                println!("Record session scores with `lectio record score` to build history.");
                return Ok(());
            }
            println!(
                "Top productive hours ({} observation(s)):\n",
                patterns.total_samples
            );
            println!("{:<6} {:>7} {:>9}", "hour", "score", "samples");
            for pattern in &patterns.patterns {
                println!(
                    "{:02}:00 {:>8.3} {:>9}",
                    pattern.hour, pattern.score, pattern.samples
                );
            }
        }
        PatternsAction::Optimize { schedule } => {
            let content = std::fs::read_to_string(&schedule)
                .map_err(|e| format!("cannot read {}: {e}", schedule.display()))?;
            let events: Vec<Value> = serde_json::from_str(&content)
                .map_err(|e| format!("cannot parse {}: {e}", schedule.display()))?;

            let optimized = store.optimize_schedule(events);
            println!("{}", serde_json::to_string_pretty(&optimized)?);
        }
        PatternsAction::Adjust => {
            let adjustment = store.adjust_difficulty_estimates()?;
            if adjustment.samples == 0 {
                println!("No difficulty feedback recorded yet; multiplier stays 1.000.");
            } else {
                println!(
                    "Difficulty multiplier set to {:.3} from {} feedback sample(s).",
                    adjustment.multiplier, adjustment.samples
                );
            }
        }
    }

    Ok(())
}
