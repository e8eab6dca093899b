mod config;

pub use config::{Config, ReadingConfig, ReviewConfig};

use std::path::PathBuf;

/// Returns `~/.config/lectio[-dev]/` based on LECTIO_ENV.
///
/// Set LECTIO_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LECTIO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lectio-dev")
    } else {
        base_dir.join("lectio")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default vault root: `LECTIO_VAULT` if set, else `~/Documents/lectio-vault`.
///
/// The vault itself is provisioned by an external bootstrapper; this only
/// resolves the path and never creates it.
pub fn default_vault_dir() -> PathBuf {
    if let Ok(path) = std::env::var("LECTIO_VAULT") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("lectio-vault")
}
