use serde::{Deserialize, Serialize};

/// A named collection of score events with a starting score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,             // ⇔ seasons.id (TEXT, epoch millis at creation)
    pub name: String,           // ⇔ seasons.name
    pub initial_score: i64,     // ⇔ seasons.initial_score
    pub create_time: String,    // ⇔ seasons.create_time (ISO8601)
}

impl Season {
    pub fn new(id: String, name: &str, initial_score: i64, create_time: String) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            initial_score,
            create_time,
        }
    }
}

/// Season row enriched with its number of real (non-initial) events.
#[derive(Debug, Clone)]
pub struct SeasonOverview {
    pub season: Season,
    pub record_count: usize,
    pub is_current: bool,
}
