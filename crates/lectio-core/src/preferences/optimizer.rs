//! Schedule reordering by learned hour weights.
//!
//! The schedule's event shape belongs to the presentation layer, so events
//! are open JSON objects here; only the `start` field is read. Events in
//! stronger hours move to the front; the sort is stable, so equal weights
//! keep their relative input order.

use serde_json::Value;
use tracing::debug;

use super::patterns::ProductivityPatterns;
use crate::timeparse;

/// Reorders externally supplied schedules using detected hour weights.
pub struct ScheduleOptimizer;

impl ScheduleOptimizer {
    /// Sort `schedule` descending by the weight of each event's start
    /// hour. Events with a missing or unparsable `start` weigh 0.0, as do
    /// hours outside the detected set. With no patterns available the
    /// input comes back unchanged.
    pub fn optimize(schedule: Vec<Value>, patterns: &ProductivityPatterns) -> Vec<Value> {
        if patterns.is_empty() {
            return schedule;
        }
        let weights = patterns.hour_weights();

        let mut scored: Vec<(f64, Value)> = schedule
            .into_iter()
            .map(|event| {
                let hour = event
                    .get("start")
                    .and_then(Value::as_str)
                    .and_then(timeparse::hour_of);
                if hour.is_none() {
                    debug!("event with missing or unparsable start weighted 0.0");
                }
                let weight = hour
                    .and_then(|hour| weights.get(&hour).copied())
                    .unwrap_or(0.0);
                (weight, event)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, event)| event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::patterns::{HourPattern, PatternDetector};
    use crate::preferences::HistoryEntry;
    use serde_json::json;

    fn patterns_for(hours: &[(u32, f64)]) -> ProductivityPatterns {
        ProductivityPatterns {
            patterns: hours
                .iter()
                .map(|&(hour, score)| HourPattern {
                    hour,
                    score,
                    samples: 1,
                })
                .collect(),
            total_samples: hours.len(),
            message: None,
        }
    }

    #[test]
    fn no_patterns_returns_schedule_unchanged() {
        let schedule = vec![
            json!({"start": "2026-03-02T08:00:00", "title": "read"}),
            json!({"start": "2026-03-02T20:00:00", "title": "review"}),
        ];
        let result =
            ScheduleOptimizer::optimize(schedule.clone(), &PatternDetector::detect(&[]));
        assert_eq!(result, schedule);
    }

    #[test]
    fn events_sort_by_hour_weight_descending() {
        let patterns = patterns_for(&[(8, 0.4), (14, 0.6), (20, 0.9)]);
        let schedule = vec![
            json!({"start": "2026-03-02T08:00:00", "title": "morning"}),
            json!({"start": "2026-03-02T20:00:00", "title": "evening"}),
            json!({"start": "2026-03-02T14:00:00", "title": "afternoon"}),
        ];

        let result = ScheduleOptimizer::optimize(schedule, &patterns);
        let titles: Vec<&str> = result
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["evening", "afternoon", "morning"]);
    }

    #[test]
    fn unparsable_or_missing_start_sinks_to_the_back() {
        let patterns = patterns_for(&[(9, 0.8)]);
        let schedule = vec![
            json!({"title": "no start"}),
            json!({"start": "sometime", "title": "bad start"}),
            json!({"start": "2026-03-02T09:00:00", "title": "peak"}),
        ];

        let result = ScheduleOptimizer::optimize(schedule, &patterns);
        assert_eq!(result[0]["title"], "peak");
        // Zero-weight events keep their relative order.
        assert_eq!(result[1]["title"], "no start");
        assert_eq!(result[2]["title"], "bad start");
    }

    #[test]
    fn zulu_suffix_is_normalized() {
        let patterns = patterns_for(&[(9, 0.8), (15, 0.2)]);
        let schedule = vec![
            json!({"start": "2026-03-02T15:00:00Z", "title": "weak"}),
            json!({"start": "2026-03-02T09:00:00Z", "title": "strong"}),
        ];
        let result = ScheduleOptimizer::optimize(schedule, &patterns);
        assert_eq!(result[0]["title"], "strong");
    }

    #[test]
    fn end_to_end_with_detected_patterns() {
        let history = vec![
            HistoryEntry {
                timestamp: Some("2026-03-01T21:00:00".to_string()),
                score: Some(0.9),
                ..Default::default()
            },
            HistoryEntry {
                timestamp: Some("2026-03-01T08:30:00".to_string()),
                score: Some(0.3),
                ..Default::default()
            },
        ];
        let patterns = PatternDetector::detect(&history);

        let schedule = vec![
            json!({"start": "2026-03-02T08:15:00", "title": "early"}),
            json!({"start": "2026-03-02T21:30:00", "title": "late"}),
        ];
        let result = ScheduleOptimizer::optimize(schedule, &patterns);
        assert_eq!(result[0]["title"], "late");
    }
}
