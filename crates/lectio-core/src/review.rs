//! Spaced-repetition review planning.
//!
//! Generates a five-session review ladder for a finished (or struggling)
//! book. Weak retention tightens the ladder, strong retention stretches
//! it; a goal that signals deep study or an exam lengthens each session.

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::timeparse::TIMESTAMP_FMT;

/// Review intervals in days, keyed by retention band.
const INTERVALS_WEAK: [u32; 5] = [1, 2, 4, 7, 14];
const INTERVALS_STANDARD: [u32; 5] = [1, 3, 7, 14, 30];
const INTERVALS_STRONG: [u32; 5] = [2, 5, 10, 21, 45];

/// Retention below this uses the tight ladder.
const WEAK_RETENTION_CEILING: f64 = 0.5;
/// Retention above this uses the stretched ladder.
const STRONG_RETENTION_FLOOR: f64 = 0.8;

/// Session length in minutes when the goal signals deep study or an exam.
const DEEP_STUDY_MINUTES: i64 = 45;
const STANDARD_MINUTES: i64 = 30;

/// Goal substrings (lowercased) that flag a deep-study or exam session.
const DEEP_STUDY_MARKERS: [&str; 4] = ["deep", "exam", "prova", "intensiv"];

/// Estimated fraction of material remembered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetentionData {
    #[serde(default = "default_retention")]
    pub retention_score: f64,
}

fn default_retention() -> f64 {
    0.65
}

impl Default for RetentionData {
    fn default() -> Self {
        Self {
            retention_score: default_retention(),
        }
    }
}

/// One planned review sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSession {
    pub book_id: String,
    /// 1-based ordinal within the plan.
    pub session: u32,
    pub start: String,
    pub end: String,
    pub goal: String,
    pub interval_days: u32,
}

/// Builds multi-session review plans.
pub struct SpacedRepetitionScheduler;

impl SpacedRepetitionScheduler {
    /// Generate a review plan anchored on today's local date.
    ///
    /// Each session starts at 09:00 local time on `today + interval` days;
    /// `interval_days` values are strictly increasing across the plan.
    pub fn generate_review_schedule(
        book_id: &str,
        retention: &RetentionData,
        goal: &str,
    ) -> Vec<ReviewSession> {
        Self::plan_from(Local::now().date_naive(), book_id, retention, goal)
    }

    /// Fixed-date variant backing [`Self::generate_review_schedule`]; also
    /// used for previews and deterministic tests.
    pub fn plan_from(
        today: NaiveDate,
        book_id: &str,
        retention: &RetentionData,
        goal: &str,
    ) -> Vec<ReviewSession> {
        let intervals = Self::intervals_for(retention.retention_score);
        let minutes = if Self::is_deep_study(goal) {
            DEEP_STUDY_MINUTES
        } else {
            STANDARD_MINUTES
        };
        let session_start = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time of day");

        intervals
            .iter()
            .enumerate()
            .map(|(idx, &days)| {
                let start = (today + Duration::days(i64::from(days))).and_time(session_start);
                let end = start + Duration::minutes(minutes);
                ReviewSession {
                    book_id: book_id.to_string(),
                    session: idx as u32 + 1,
                    start: start.format(TIMESTAMP_FMT).to_string(),
                    end: end.format(TIMESTAMP_FMT).to_string(),
                    goal: goal.to_string(),
                    interval_days: days,
                }
            })
            .collect()
    }

    fn intervals_for(retention_score: f64) -> [u32; 5] {
        if retention_score < WEAK_RETENTION_CEILING {
            INTERVALS_WEAK
        } else if retention_score > STRONG_RETENTION_FLOOR {
            INTERVALS_STRONG
        } else {
            INTERVALS_STANDARD
        }
    }

    fn is_deep_study(goal: &str) -> bool {
        let lowered = goal.to_lowercase();
        DEEP_STUDY_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }
}
