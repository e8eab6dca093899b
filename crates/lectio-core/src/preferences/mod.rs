//! User preference storage and the learning-history log.
//!
//! A [`PreferenceStore`] is constructed with an explicit vault path; the
//! two JSON documents live under the vault's resource directory:
//!
//! - `preferences.json` -- open key/value document
//! - `preferences_learning_history.json` -- append-only feedback log,
//!   capped at 500 entries on save
//!
//! Missing or malformed files load as empty defaults; only write failures
//! surface as errors.

pub mod optimizer;
pub mod patterns;

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::difficulty::ReaderProfile;
use crate::error::{Result, StoreError};
use optimizer::ScheduleOptimizer;
use patterns::{PatternDetector, ProductivityPatterns};

/// Vault subdirectory holding the planner's resource documents.
pub const RESOURCE_DIR: &str = "06-RECURSOS";
/// Preferences document file name.
pub const PREFERENCES_FILE: &str = "preferences.json";
/// Learning-history log file name.
pub const HISTORY_FILE: &str = "preferences_learning_history.json";

/// On-disk history cap; oldest entries are dropped on save.
pub const HISTORY_CAP: usize = 500;
/// How many recent feedback entries feed the difficulty adjustment.
const ADJUSTMENT_WINDOW: usize = 200;

const MULTIPLIER_FLOOR: f64 = 0.7;
const MULTIPLIER_CEILING: f64 = 1.4;

/// One entry in the append-only learning history.
///
/// Every field except `timestamp` is optional; an entry carries either a
/// `manual_update` key set, a productivity `score`, or a
/// `difficulty_delta`. Unknown extra fields on disk are tolerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_delta: Option<f64>,
}

/// Result of a difficulty-multiplier adjustment pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAdjustment {
    pub multiplier: f64,
    pub samples: usize,
}

/// File-backed preferences and learning history for one vault.
pub struct PreferenceStore {
    resource_dir: PathBuf,
    preferences: Map<String, Value>,
    history: Vec<HistoryEntry>,
}

impl PreferenceStore {
    /// Open the store for a vault. Documents are loaded eagerly; missing
    /// or malformed files become empty defaults, never errors.
    pub fn open(vault_path: impl AsRef<Path>) -> Self {
        let resource_dir = vault_path.as_ref().join(RESOURCE_DIR);
        let preferences = load_object(&resource_dir.join(PREFERENCES_FILE));
        let history = load_history(&resource_dir.join(HISTORY_FILE));
        Self {
            resource_dir,
            preferences,
            history,
        }
    }

    /// The full preferences document.
    pub fn get_all(&self) -> &Map<String, Value> {
        &self.preferences
    }

    /// The in-memory learning history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Path of the preferences document.
    pub fn preferences_path(&self) -> PathBuf {
        self.resource_dir.join(PREFERENCES_FILE)
    }

    /// Path of the learning-history log.
    pub fn history_path(&self) -> PathBuf {
        self.resource_dir.join(HISTORY_FILE)
    }

    /// Shallow-merge `updates` into the document (updates win), persist
    /// it, and append a `manual_update` history entry recording the sorted
    /// set of touched top-level keys.
    pub fn update(&mut self, updates: Map<String, Value>) -> Result<()> {
        let mut keys: Vec<String> = updates.keys().cloned().collect();
        keys.sort();

        for (key, value) in updates {
            self.preferences.insert(key, value);
        }
        self.save_preferences()?;

        self.history.push(HistoryEntry {
            timestamp: Some(now_timestamp()),
            kind: Some("manual_update".to_string()),
            keys: Some(keys),
            ..Default::default()
        });
        self.save_history()?;
        Ok(())
    }

    /// Append a productivity score observation (0-1 by convention) for the
    /// current moment, feeding hour-of-day pattern detection.
    pub fn record_session_score(&mut self, score: f64) -> Result<()> {
        self.history.push(HistoryEntry {
            timestamp: Some(now_timestamp()),
            score: Some(score),
            ..Default::default()
        });
        self.save_history()
    }

    /// Append a difficulty feedback delta (positive: content felt harder
    /// than estimated), feeding the multiplier adjustment.
    pub fn record_difficulty_feedback(&mut self, delta: f64) -> Result<()> {
        self.history.push(HistoryEntry {
            timestamp: Some(now_timestamp()),
            difficulty_delta: Some(delta),
            ..Default::default()
        });
        self.save_history()
    }

    /// Typed view of the learned difficulty multiplier.
    pub fn reader_profile(&self) -> ReaderProfile {
        let multiplier = self
            .preferences
            .get("learning_style")
            .and_then(|style| style.get("difficulty_multiplier"))
            .and_then(Value::as_f64)
            .unwrap_or(1.0);
        ReaderProfile {
            difficulty_multiplier: multiplier.clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEILING),
        }
    }

    /// Detect per-hour productivity patterns from the history log.
    pub fn detect_patterns(&self) -> ProductivityPatterns {
        PatternDetector::detect(&self.history)
    }

    /// Reorder a caller-supplied schedule by detected hour weights.
    /// With no patterns available the schedule is returned unchanged.
    pub fn optimize_schedule(&self, schedule: Vec<Value>) -> Vec<Value> {
        ScheduleOptimizer::optimize(schedule, &self.detect_patterns())
    }

    /// Re-derive the difficulty multiplier from recent feedback deltas.
    ///
    /// Averages `difficulty_delta` over the most recent 200 entries that
    /// carry one; with no samples, returns a neutral multiplier without
    /// touching disk. Otherwise the clamped multiplier is written into
    /// `learning_style.difficulty_multiplier` and the document persisted.
    pub fn adjust_difficulty_estimates(&mut self) -> Result<DifficultyAdjustment> {
        let deltas: Vec<f64> = self
            .history
            .iter()
            .rev()
            .filter_map(|entry| entry.difficulty_delta)
            .take(ADJUSTMENT_WINDOW)
            .collect();

        if deltas.is_empty() {
            return Ok(DifficultyAdjustment {
                multiplier: 1.0,
                samples: 0,
            });
        }

        let avg_delta = deltas.iter().sum::<f64>() / deltas.len() as f64;
        let multiplier =
            round3((1.0 + avg_delta).clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEILING));

        let style = self
            .preferences
            .entry("learning_style".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !style.is_object() {
            *style = Value::Object(Map::new());
        }
        if let Some(obj) = style.as_object_mut() {
            obj.insert(
                "difficulty_multiplier".to_string(),
                serde_json::Number::from_f64(multiplier)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            );
        }
        self.save_preferences()?;

        Ok(DifficultyAdjustment {
            multiplier,
            samples: deltas.len(),
        })
    }

    fn save_preferences(&self) -> Result<()> {
        write_document(
            &self.preferences_path(),
            &Value::Object(self.preferences.clone()),
        )
    }

    fn save_history(&mut self) -> Result<()> {
        if self.history.len() > HISTORY_CAP {
            let excess = self.history.len() - HISTORY_CAP;
            self.history.drain(..excess);
        }
        let path = self.history_path();
        let entries = serde_json::to_value(&self.history)
            .map_err(|source| StoreError::SerializeFailed {
                path: path.clone(),
                source,
            })?;
        write_document(&path, &entries)
    }
}

/// Timestamp format matching the history log's ISO convention.
fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1_000.0).round() / 1_000.0
}

fn load_object(path: &Path) -> Map<String, Value> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!(path = %path.display(), "malformed preferences document, using empty defaults");
            Map::new()
        }
    }
}

fn load_history(path: &Path) -> Vec<HistoryEntry> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(Value::Array(raw)) = serde_json::from_str::<Value>(&content) else {
        warn!(path = %path.display(), "malformed history log, using empty history");
        return Vec::new();
    };
    // Entry-level filtering: one bad record never discards the log.
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<HistoryEntry>(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(%err, "skipping malformed history entry");
                None
            }
        })
        .collect()
}

fn write_document(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content =
        serde_json::to_string_pretty(document).map_err(|source| StoreError::SerializeFailed {
            path: path.to_path_buf(),
            source,
        })?;
    std::fs::write(path, content).map_err(|source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
