//! Preference document commands.

use clap::Subcommand;
use serde_json::{Map, Value};

use lectio_core::{Config, PreferenceStore};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the preferences document (or one top-level key)
    Get {
        /// Top-level key; prints the whole document when omitted
        key: Option<String>,
    },
    /// Set a top-level key to a JSON value (bare words become strings)
    Set { key: String, value: String },
}

pub fn run(action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = PreferenceStore::open(config.vault_path());

    match action {
        PrefsAction::Get { key } => {
            let prefs = store.get_all();
            match key {
                Some(key) => match prefs.get(&key) {
                    Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
                    None => println!("null"),
                },
                None => println!("{}", serde_json::to_string_pretty(prefs)?),
            }
        }
        PrefsAction::Set { key, value } => {
            // Accept raw JSON; fall back to treating the input as a string.
            let parsed: Value = serde_json::from_str(&value)
                .unwrap_or_else(|_| Value::String(value.clone()));

            let mut updates = Map::new();
            updates.insert(key.clone(), parsed);
            store.update(updates)?;
            println!("Updated '{key}'.");
        }
    }

    Ok(())
}
