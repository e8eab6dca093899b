//! # Lectio Core Library
//!
//! This library provides the core engine for Lectio, a personal
//! reading/study planner. It is CLI-first: all operations are available
//! via a standalone CLI binary, with any GUI being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Allocator**: ranks quality-scored candidate time slots and commits
//!   reading pages or review windows into them without overlap
//! - **Difficulty**: lexical difficulty estimation scaled by a learned
//!   per-reader multiplier
//! - **Review**: spaced-repetition plans driven by a retention score
//! - **Preferences**: JSON-backed preference document and learning
//!   history, with per-hour pattern detection and schedule optimization
//! - **Storage**: config file and vault path resolution
//!
//! ## Key Components
//!
//! - [`TimeSlotAllocator`]: slot ranking and page/session placement
//! - [`PreferenceStore`]: preference document + feedback history
//! - [`PatternDetector`]: per-hour productivity weights
//! - [`SpacedRepetitionScheduler`]: multi-session review plans

pub mod allocator;
pub mod difficulty;
pub mod error;
pub mod preferences;
pub mod review;
pub mod storage;
mod timeparse;

pub use allocator::{Allocation, Book, ReadingPreferences, TimeSlot, TimeSlotAllocator};
pub use difficulty::{estimate_difficulty, ReaderProfile};
pub use error::{CoreError, StoreError};
pub use preferences::optimizer::ScheduleOptimizer;
pub use preferences::patterns::{HourPattern, PatternDetector, ProductivityPatterns};
pub use preferences::{DifficultyAdjustment, HistoryEntry, PreferenceStore};
pub use review::{RetentionData, ReviewSession, SpacedRepetitionScheduler};
pub use storage::Config;
