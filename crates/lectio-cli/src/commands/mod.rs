pub mod allocate;
pub mod config;
pub mod difficulty;
pub mod patterns;
pub mod prefs;
pub mod record;
pub mod review;

use std::path::Path;

use lectio_core::TimeSlot;

/// Load candidate slots from a JSON file (array of slot objects).
pub fn load_slots(path: &Path) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let slots: Vec<TimeSlot> = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(slots)
}
