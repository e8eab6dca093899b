//! Per-hour productivity pattern detection over the learning history.
//!
//! Scored history entries are bucketed by the hour-of-day of their
//! timestamp; each hour with samples yields a mean score. The strongest
//! hours become the weights that drive schedule optimization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{round3, HistoryEntry};
use crate::timeparse;

/// How many peak hours a detection pass reports.
pub const TOP_HOURS: usize = 8;

/// Mean productivity for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPattern {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Mean historical score for this hour, rounded to 3 decimals
    pub score: f64,
    /// Number of observations behind the mean
    pub samples: usize,
}

/// Detection result: the top hours plus the total sample count.
///
/// "No usable history" is a legitimate result, not an error: `patterns`
/// is empty and `message` explains why.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductivityPatterns {
    pub patterns: Vec<HourPattern>,
    pub total_samples: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProductivityPatterns {
    /// The explicit "not enough data yet" result.
    pub fn insufficient() -> Self {
        Self {
            patterns: Vec::new(),
            total_samples: 0,
            message: Some(
                "insufficient history to detect productivity patterns".to_string(),
            ),
        }
    }

    /// True when no pattern was detected.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Hour-of-day to mean-score lookup for the detected hours.
    pub fn hour_weights(&self) -> HashMap<u32, f64> {
        self.patterns
            .iter()
            .map(|pattern| (pattern.hour, pattern.score))
            .collect()
    }
}

/// Derives per-hour productivity weights from the history log.
pub struct PatternDetector;

impl PatternDetector {
    /// Group scored entries by hour-of-day and report the top hours by
    /// mean score. Entries without a score, without a timestamp, or with
    /// an unparsable timestamp are skipped.
    pub fn detect(history: &[HistoryEntry]) -> ProductivityPatterns {
        let mut sums = [0.0f64; 24];
        let mut counts = [0usize; 24];
        let mut total_samples = 0usize;

        for entry in history {
            let Some(score) = entry.score else {
                continue;
            };
            let Some(timestamp) = entry.timestamp.as_deref() else {
                debug!("scored history entry without timestamp, skipped");
                continue;
            };
            let Some(hour) = timeparse::hour_of(timestamp) else {
                debug!(timestamp, "scored history entry with unparsable timestamp, skipped");
                continue;
            };
            let hour = hour as usize;
            sums[hour] += score;
            counts[hour] += 1;
            total_samples += 1;
        }

        if total_samples == 0 {
            return ProductivityPatterns::insufficient();
        }

        let mut patterns: Vec<HourPattern> = (0..24)
            .filter(|&hour| counts[hour] > 0)
            .map(|hour| HourPattern {
                hour: hour as u32,
                score: round3(sums[hour] / counts[hour] as f64),
                samples: counts[hour],
            })
            .collect();

        // Mean score descending; earlier hour wins ties so output is
        // deterministic.
        patterns.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.hour.cmp(&b.hour))
        });
        patterns.truncate(TOP_HOURS);

        ProductivityPatterns {
            patterns,
            total_samples,
            message: None,
        }
    }
}
