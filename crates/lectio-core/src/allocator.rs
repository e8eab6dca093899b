//! Time-slot allocation for reading pages and review sessions.
//!
//! Candidate slots arrive from the presentation layer already scored for
//! quality; this module ranks and consumes them:
//! - [`TimeSlotAllocator::allocate_time`] places reading pages into the
//!   best slots without splitting any slot
//! - [`TimeSlotAllocator::select_review_slots`] picks non-overlapping
//!   review windows, truncated to the session length
//!
//! Malformed slots are never an error: they are filtered out with a
//! `debug`-level diagnostic and the rest of the batch proceeds.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::timeparse::{parse_timestamp, TIMESTAMP_FMT};

/// Shortest slot worth opening a book for (minutes).
const MIN_READING_SLOT_MINUTES: u32 = 25;
/// Fewest pages worth sitting down for.
const MIN_PAGES_PER_SESSION: u32 = 5;
/// Floor for review session length (minutes).
const MIN_REVIEW_DURATION_MINUTES: i64 = 15;
/// Floor on reading pace so a zero or nonsense speed cannot stall allocation.
const MIN_PAGES_PER_MINUTE: f64 = 0.05;

/// A book being read. The engine only reads it; progress lives with the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Book {
    pub total_pages: u32,
    pub current_page: u32,
}

impl Book {
    /// Create a book record; `current_page` is clamped to `total_pages`.
    pub fn new(total_pages: u32, current_page: u32) -> Self {
        Self {
            total_pages,
            current_page: current_page.min(total_pages),
        }
    }

    /// Pages left to read.
    pub fn remaining_pages(&self) -> u32 {
        self.total_pages.saturating_sub(self.current_page)
    }
}

/// A candidate time interval with a caller-supplied quality score.
///
/// `start`/`end` stay strings: ranking ties break on the raw timestamp
/// text, so a parse/format cycle must not reorder them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default = "default_quality")]
    pub quality_score: f64,
}

fn default_quality() -> f64 {
    0.5
}

impl TimeSlot {
    /// Create a slot from explicit fields.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        duration_minutes: u32,
        quality_score: f64,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            duration_minutes,
            quality_score,
        }
    }
}

/// The portion of a slot committed to reading pages or a review session.
///
/// `pages` is present for reading allocations and absent for review
/// sessions. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    pub quality_score: f64,
}

/// Reading-pace preferences consumed by [`TimeSlotAllocator::allocate_time`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadingPreferences {
    #[serde(default = "default_reading_speed")]
    pub reading_speed_pages_hour: f64,
    #[serde(default = "default_target_pages")]
    pub target_pages_per_session: u32,
}

fn default_reading_speed() -> f64 {
    10.0
}

fn default_target_pages() -> u32 {
    20
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            reading_speed_pages_hour: default_reading_speed(),
            target_pages_per_session: default_target_pages(),
        }
    }
}

/// Ranks and consumes candidate time slots.
pub struct TimeSlotAllocator;

impl TimeSlotAllocator {
    /// Allocate reading pages into the best available slots.
    ///
    /// Slots are ranked by quality score (descending, stable on ties) and
    /// consumed whole; slots shorter than 25 minutes are skipped. Each
    /// allocation carries between 5 pages and the per-session target,
    /// bounded by what the slot's duration sustains at the reader's pace.
    /// The sum of allocated pages never exceeds the book's remaining pages.
    ///
    /// Returns an empty list when the book is finished or when no slot
    /// meets the duration floor; both are legitimate "no fit" outcomes,
    /// not errors.
    pub fn allocate_time(
        book: &Book,
        available_slots: &[TimeSlot],
        prefs: &ReadingPreferences,
    ) -> Vec<Allocation> {
        let mut remaining = book.remaining_pages();
        if remaining == 0 {
            return Vec::new();
        }

        let pages_per_minute =
            (prefs.reading_speed_pages_hour / 60.0).max(MIN_PAGES_PER_MINUTE);
        let target = prefs.target_pages_per_session.max(1);

        let mut ranked: Vec<&TimeSlot> = available_slots.iter().collect();
        ranked.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut allocations = Vec::new();
        for slot in ranked {
            if remaining == 0 {
                break;
            }
            if slot.duration_minutes < MIN_READING_SLOT_MINUTES {
                debug!(
                    start = %slot.start,
                    minutes = slot.duration_minutes,
                    "slot below reading floor, skipped"
                );
                continue;
            }

            let pace_pages =
                (f64::from(slot.duration_minutes) * pages_per_minute).floor() as u32;
            // The 5-page floor yields to the remaining count so the
            // per-call page budget is never overshot.
            let pages = pace_pages
                .min(target)
                .max(MIN_PAGES_PER_SESSION)
                .min(remaining);

            allocations.push(Allocation {
                start: slot.start.clone(),
                end: slot.end.clone(),
                duration_minutes: slot.duration_minutes,
                pages: Some(pages),
                quality_score: slot.quality_score,
            });
            remaining -= pages;
        }

        allocations
    }

    /// Select non-overlapping review windows from candidate slots.
    ///
    /// Slots are ranked by `(quality_score, start)` descending -- the raw
    /// start string is the deterministic tie-break. A slot is rejected if
    /// its timestamps are missing or unparsable, if the parsed interval is
    /// shorter than the session length, or if it overlaps an already
    /// selected window (half-open interval test). Accepted slots are
    /// truncated to exactly the session length from their own start.
    ///
    /// The result is sorted by ascending start for presentation.
    pub fn select_review_slots(
        available_slots: &[TimeSlot],
        sessions_per_day: u32,
        session_duration_minutes: u32,
    ) -> Vec<Allocation> {
        let target_sessions = sessions_per_day.max(1) as usize;
        let target_duration =
            i64::from(session_duration_minutes).max(MIN_REVIEW_DURATION_MINUTES);

        let mut ranked: Vec<&TimeSlot> = available_slots.iter().collect();
        ranked.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.start.cmp(&a.start))
        });

        let mut selected: Vec<(NaiveDateTime, NaiveDateTime, Allocation)> = Vec::new();
        for slot in ranked {
            if selected.len() >= target_sessions {
                break;
            }
            let Some(start) = parse_timestamp(&slot.start) else {
                debug!(start = %slot.start, "slot start missing or unparsable, rejected");
                continue;
            };
            let Some(end) = parse_timestamp(&slot.end) else {
                debug!(end = %slot.end, "slot end missing or unparsable, rejected");
                continue;
            };
            if end - start < Duration::minutes(target_duration) {
                debug!(
                    start = %slot.start,
                    "slot shorter than the session length, rejected"
                );
                continue;
            }

            let truncated_end = start + Duration::minutes(target_duration);
            let overlaps = selected
                .iter()
                .any(|(other_start, other_end, _)| {
                    start < *other_end && truncated_end > *other_start
                });
            if overlaps {
                debug!(start = %slot.start, "slot overlaps a selected window, rejected");
                continue;
            }

            selected.push((
                start,
                truncated_end,
                Allocation {
                    start: slot.start.clone(),
                    end: truncated_end.format(TIMESTAMP_FMT).to_string(),
                    duration_minutes: target_duration as u32,
                    pages: None,
                    quality_score: slot.quality_score,
                },
            ));
        }

        let mut out: Vec<Allocation> =
            selected.into_iter().map(|(_, _, alloc)| alloc).collect();
        out.sort_by(|a, b| a.start.cmp(&b.start));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str, minutes: u32, quality: f64) -> TimeSlot {
        TimeSlot::new(start, end, minutes, quality)
    }

    #[test]
    fn book_clamps_current_page() {
        let book = Book::new(100, 150);
        assert_eq!(book.current_page, 100);
        assert_eq!(book.remaining_pages(), 0);
    }

    #[test]
    fn allocate_finished_book_returns_empty() {
        let book = Book::new(100, 100);
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T10:00", 60, 0.9)];
        let allocations =
            TimeSlotAllocator::allocate_time(&book, &slots, &ReadingPreferences::default());
        assert!(allocations.is_empty());
    }

    #[test]
    fn allocate_single_slot_scenario() {
        // 20 remaining pages, 40 min at 30 pages/hour sustains 20 pages,
        // target is 20: all three bounds agree on 20.
        let book = Book::new(100, 80);
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T09:40", 40, 0.9)];
        let prefs = ReadingPreferences {
            reading_speed_pages_hour: 30.0,
            target_pages_per_session: 20,
        };

        let allocations = TimeSlotAllocator::allocate_time(&book, &slots, &prefs);
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].pages, Some(20));
        assert_eq!(allocations[0].duration_minutes, 40);
    }

    #[test]
    fn allocate_skips_short_slots_entirely() {
        let book = Book::new(100, 0);
        let slots = vec![
            slot("2026-03-02T09:00", "2026-03-02T09:20", 20, 0.9),
            slot("2026-03-02T10:00", "2026-03-02T10:24", 24, 0.8),
        ];
        let allocations =
            TimeSlotAllocator::allocate_time(&book, &slots, &ReadingPreferences::default());
        assert!(allocations.is_empty(), "no slot meets the 25-minute floor");
    }

    #[test]
    fn allocate_ranks_by_quality_descending() {
        let book = Book::new(1000, 0);
        let slots = vec![
            slot("2026-03-02T08:00", "2026-03-02T09:00", 60, 0.3),
            slot("2026-03-02T10:00", "2026-03-02T11:00", 60, 0.9),
            slot("2026-03-02T12:00", "2026-03-02T13:00", 60, 0.6),
        ];
        let allocations =
            TimeSlotAllocator::allocate_time(&book, &slots, &ReadingPreferences::default());
        assert_eq!(allocations.len(), 3);
        assert_eq!(allocations[0].start, "2026-03-02T10:00");
        assert_eq!(allocations[1].start, "2026-03-02T12:00");
        assert_eq!(allocations[2].start, "2026-03-02T08:00");
    }

    #[test]
    fn allocate_preserves_insertion_order_on_quality_ties() {
        let book = Book::new(1000, 0);
        let slots = vec![
            slot("2026-03-02T12:00", "2026-03-02T13:00", 60, 0.5),
            slot("2026-03-02T08:00", "2026-03-02T09:00", 60, 0.5),
        ];
        let allocations =
            TimeSlotAllocator::allocate_time(&book, &slots, &ReadingPreferences::default());
        assert_eq!(allocations[0].start, "2026-03-02T12:00");
        assert_eq!(allocations[1].start, "2026-03-02T08:00");
    }

    #[test]
    fn allocate_stops_once_pages_run_out() {
        let book = Book::new(30, 0);
        let slots = vec![
            slot("2026-03-02T09:00", "2026-03-02T10:00", 60, 0.9),
            slot("2026-03-02T11:00", "2026-03-02T12:00", 60, 0.8),
            slot("2026-03-02T14:00", "2026-03-02T15:00", 60, 0.7),
        ];
        let prefs = ReadingPreferences {
            reading_speed_pages_hour: 60.0,
            target_pages_per_session: 20,
        };

        let allocations = TimeSlotAllocator::allocate_time(&book, &slots, &prefs);
        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].pages, Some(20));
        assert_eq!(allocations[1].pages, Some(10), "tail capped by remaining pages");
    }

    #[test]
    fn allocate_never_exceeds_remaining_even_below_page_floor() {
        let book = Book::new(100, 97);
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T10:00", 60, 0.9)];
        let prefs = ReadingPreferences {
            reading_speed_pages_hour: 60.0,
            target_pages_per_session: 20,
        };

        let allocations = TimeSlotAllocator::allocate_time(&book, &slots, &prefs);
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].pages, Some(3));
    }

    #[test]
    fn allocate_applies_page_floor_on_slow_pace() {
        // 25 minutes at the default pace sustains ~4 pages; the floor lifts
        // the session to 5.
        let book = Book::new(100, 0);
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T09:25", 25, 0.9)];
        let allocations =
            TimeSlotAllocator::allocate_time(&book, &slots, &ReadingPreferences::default());
        assert_eq!(allocations[0].pages, Some(5));
    }

    #[test]
    fn review_slots_truncate_to_session_length() {
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T11:00", 120, 0.9)];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 1, 30);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].end, "2026-03-02T09:30:00");
        assert_eq!(selected[0].duration_minutes, 30);
        assert_eq!(selected[0].pages, None);
    }

    #[test]
    fn review_slots_reject_overlapping_windows() {
        let slots = vec![
            slot("2026-03-02T09:00", "2026-03-02T10:00", 60, 0.9),
            slot("2026-03-02T09:15", "2026-03-02T10:15", 60, 0.8),
            slot("2026-03-02T11:00", "2026-03-02T12:00", 60, 0.7),
        ];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 3, 45);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].start, "2026-03-02T09:00");
        assert_eq!(selected[1].start, "2026-03-02T11:00");
    }

    #[test]
    fn review_slots_back_to_back_windows_do_not_overlap() {
        // Half-open intervals: one ending exactly when the next starts is fine.
        let slots = vec![
            slot("2026-03-02T09:00", "2026-03-02T09:30", 30, 0.9),
            slot("2026-03-02T09:30", "2026-03-02T10:00", 30, 0.9),
        ];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 2, 30);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn review_slots_equal_quality_breaks_tie_on_later_start_string() {
        let slots = vec![
            slot("2026-03-02T09:00", "2026-03-02T10:00", 60, 0.8),
            slot("2026-03-02T09:30", "2026-03-02T10:30", 60, 0.8),
        ];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 1, 30);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].start, "2026-03-02T09:30");
    }

    #[test]
    fn review_slots_skip_unparsable_and_short_slots() {
        let slots = vec![
            slot("", "2026-03-02T10:00", 60, 0.9),
            slot("whenever", "2026-03-02T10:00", 60, 0.9),
            slot("2026-03-02T09:00", "2026-03-02T09:10", 10, 0.9),
            slot("2026-03-02 14:00", "2026-03-02 15:00", 60, 0.5),
        ];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 4, 15);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].start, "2026-03-02 14:00");
    }

    #[test]
    fn review_slots_output_sorted_by_start() {
        let slots = vec![
            slot("2026-03-02T15:00", "2026-03-02T16:00", 60, 0.9),
            slot("2026-03-02T08:00", "2026-03-02T09:00", 60, 0.5),
            slot("2026-03-02T11:00", "2026-03-02T12:00", 60, 0.7),
        ];
        let selected = TimeSlotAllocator::select_review_slots(&slots, 3, 30);
        let starts: Vec<&str> = selected.iter().map(|a| a.start.as_str()).collect();
        assert_eq!(
            starts,
            vec!["2026-03-02T08:00", "2026-03-02T11:00", "2026-03-02T15:00"]
        );
    }

    #[test]
    fn review_slots_duration_floor_is_fifteen_minutes() {
        let slots = vec![slot("2026-03-02T09:00", "2026-03-02T09:14", 14, 0.9)];
        // A requested 5-minute session is lifted to 15, which this slot
        // cannot hold.
        let selected = TimeSlotAllocator::select_review_slots(&slots, 1, 5);
        assert!(selected.is_empty());
    }
}
