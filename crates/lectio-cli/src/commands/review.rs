//! Review commands: spaced-repetition plans and review-slot selection.

use std::path::PathBuf;

use clap::Subcommand;

use lectio_core::{Config, RetentionData, SpacedRepetitionScheduler, TimeSlotAllocator};

use super::load_slots;

#[derive(Subcommand)]
pub enum ReviewAction {
    /// Generate a spaced-repetition review plan for a book
    Plan {
        /// Book identifier
        #[arg(long)]
        book_id: String,
        /// Estimated retention score (0-1)
        #[arg(long)]
        retention: Option<f64>,
        /// Review goal, e.g. "light re-read" or "prova final"
        #[arg(long, default_value = "review")]
        goal: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Pick non-overlapping review windows from candidate slots
    Slots {
        /// JSON file with candidate slots
        #[arg(long)]
        slots: PathBuf,
        /// Review sessions per day (default from config)
        #[arg(long)]
        sessions_per_day: Option<u32>,
        /// Session length in minutes (default from config)
        #[arg(long)]
        duration: Option<u32>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ReviewAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReviewAction::Plan {
            book_id,
            retention,
            goal,
            json,
        } => plan(book_id, retention, goal, json),
        ReviewAction::Slots {
            slots,
            sessions_per_day,
            duration,
            json,
        } => select_slots(slots, sessions_per_day, duration, json),
    }
}

fn plan(
    book_id: String,
    retention: Option<f64>,
    goal: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let retention_data = retention
        .map(|retention_score| RetentionData { retention_score })
        .unwrap_or_default();

    let sessions =
        SpacedRepetitionScheduler::generate_review_schedule(&book_id, &retention_data, &goal);

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    println!(
        "Review plan for '{}' (retention {:.2}):\n",
        book_id, retention_data.retention_score
    );
    println!("{:<9} {:<21} {:<21} {:>6}", "session", "start", "end", "+days");
    for session in &sessions {
        println!(
            "{:<9} {:<21} {:<21} {:>6}",
            session.session, session.start, session.end, session.interval_days
        );
    }

    Ok(())
}

fn select_slots(
    slots_path: PathBuf,
    sessions_per_day: Option<u32>,
    duration: Option<u32>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let sessions_per_day = sessions_per_day.unwrap_or(config.review.sessions_per_day);
    let duration = duration.unwrap_or(config.review.session_duration_minutes);

    let slots = load_slots(&slots_path)?;
    let selected = TimeSlotAllocator::select_review_slots(&slots, sessions_per_day, duration);

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!(
            "No review windows fit: {} candidate slot(s), {} minute session(s) requested.",
            slots.len(),
            duration
        );
        return Ok(());
    }

    println!("Selected {} review window(s):\n", selected.len());
    println!("{:<22} {:<22} {:>8} {:>9}", "start", "end", "minutes", "quality");
    for alloc in &selected {
        println!(
            "{:<22} {:<22} {:>8} {:>9.2}",
            alloc.start, alloc.end, alloc.duration_minutes, alloc.quality_score
        );
    }

    Ok(())
}
