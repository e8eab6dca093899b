//! Allocate command: place reading pages into candidate slots.

use std::path::PathBuf;

use clap::Args;

use lectio_core::{Book, Config, ReadingPreferences, TimeSlotAllocator};

use super::load_slots;

#[derive(Args)]
pub struct AllocateArgs {
    /// Total pages of the book
    #[arg(long)]
    pub total_pages: u32,
    /// Current page (0-based progress)
    #[arg(long, default_value_t = 0)]
    pub current_page: u32,
    /// JSON file with candidate slots
    #[arg(long)]
    pub slots: PathBuf,
    /// Reading speed in pages per hour (default from config)
    #[arg(long)]
    pub reading_speed: Option<f64>,
    /// Target pages per session (default from config)
    #[arg(long)]
    pub target_pages: Option<u32>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AllocateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let defaults = config.reading_preferences();
    let prefs = ReadingPreferences {
        reading_speed_pages_hour: args
            .reading_speed
            .unwrap_or(defaults.reading_speed_pages_hour),
        target_pages_per_session: args
            .target_pages
            .unwrap_or(defaults.target_pages_per_session),
    };

    let book = Book::new(args.total_pages, args.current_page);
    let slots = load_slots(&args.slots)?;
    let allocations = TimeSlotAllocator::allocate_time(&book, &slots, &prefs);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&allocations)?);
        return Ok(());
    }

    if allocations.is_empty() {
        println!(
            "No allocations: {} pages remaining, {} candidate slots.",
            book.remaining_pages(),
            slots.len()
        );
        println!("Slots shorter than 25 minutes are not used.");
        return Ok(());
    }

    println!(
        "Allocated {} session(s) for {} remaining page(s):\n",
        allocations.len(),
        book.remaining_pages()
    );
    println!("{:<22} {:>8} {:>8} {:>9}", "start", "minutes", "pages", "quality");
    for alloc in &allocations {
        println!(
            "{:<22} {:>8} {:>8} {:>9.2}",
            alloc.start,
            alloc.duration_minutes,
            alloc.pages.unwrap_or(0),
            alloc.quality_score
        );
    }
    let total: u32 = allocations.iter().filter_map(|a| a.pages).sum();
    println!("\nTotal pages planned: {total}");

    Ok(())
}
