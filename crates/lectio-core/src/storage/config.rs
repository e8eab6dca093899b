//! TOML-based application configuration.
//!
//! Stores planner defaults:
//! - Vault location override
//! - Reading pace and per-session page target
//! - Review session cadence and length
//!
//! Configuration is stored at `~/.config/lectio/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{config_dir, default_vault_dir};
use crate::allocator::ReadingPreferences;

/// Reading defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_reading_speed")]
    pub reading_speed_pages_hour: f64,
    #[serde(default = "default_target_pages")]
    pub target_pages_per_session: u32,
}

/// Review defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_sessions_per_day")]
    pub sessions_per_day: u32,
    #[serde(default = "default_session_duration")]
    pub session_duration_minutes: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/lectio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Vault root override; falls back to `LECTIO_VAULT` or
    /// `~/Documents/lectio-vault`.
    #[serde(default)]
    pub vault_path: Option<String>,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

// Default functions
fn default_reading_speed() -> f64 {
    10.0
}
fn default_target_pages() -> u32 {
    20
}
fn default_sessions_per_day() -> u32 {
    2
}
fn default_session_duration() -> u32 {
    30
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            reading_speed_pages_hour: default_reading_speed(),
            target_pages_per_session: default_target_pages(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            sessions_per_day: default_sessions_per_day(),
            session_duration_minutes: default_session_duration(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: None,
            reading: ReadingConfig::default(),
            review: ReviewConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Resolved vault root.
    pub fn vault_path(&self) -> PathBuf {
        self.vault_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_vault_dir)
    }

    /// Reading preferences consumed by the allocator.
    pub fn reading_preferences(&self) -> ReadingPreferences {
        ReadingPreferences {
            reading_speed_pages_hour: self.reading.reading_speed_pages_hour,
            target_pages_per_session: self.reading.target_pages_per_session,
        }
    }
}
