//! Difficulty command: score a chunk of text for the current reader.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use lectio_core::{estimate_difficulty, Config, PreferenceStore, ReaderProfile};

#[derive(Args)]
pub struct DifficultyArgs {
    /// Text file to score; reads stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Ignore the learned multiplier and score with a neutral profile
    #[arg(long)]
    pub neutral: bool,
}

pub fn run(args: DifficultyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let profile = if args.neutral {
        ReaderProfile::default()
    } else {
        let config = Config::load_or_default();
        PreferenceStore::open(config.vault_path()).reader_profile()
    };

    let score = estimate_difficulty(&text, &profile);
    println!("difficulty: {score:.4}");
    println!("multiplier: {:.3}", profile.difficulty_multiplier);

    Ok(())
}
