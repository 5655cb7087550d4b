use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 10_000;

/// Display time carried by the synthetic initial event of every season.
pub const SENTINEL_TIME: &str = "0000-00-00 00:00";

/// One timestamped score observation within a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub id: String,     // ⇔ events.id (unique within the season)
    pub score: i64,     // ⇔ events.score (0..=10000)
    pub time: String,   // ⇔ events.time (TEXT "YYYY-MM-DD HH:MM")
    pub timestamp: i64, // ⇔ events.timestamp (epoch millis, 0 = initial event)
}

impl ScoreEvent {
    pub fn new(id: String, score: i64, time: String, timestamp: i64) -> Self {
        Self {
            id,
            score,
            time,
            timestamp,
        }
    }

    /// The seed event created together with a season.
    pub fn initial(season_id: &str, initial_score: i64) -> Self {
        Self {
            id: format!("initial_{season_id}"),
            score: initial_score,
            time: SENTINEL_TIME.to_string(),
            timestamp: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.timestamp == 0
    }
}

/// Drop the initial event(s), keeping input order.
pub fn without_sentinel(events: &[ScoreEvent]) -> Vec<ScoreEvent> {
    events.iter().filter(|e| !e.is_sentinel()).cloned().collect()
}

pub fn is_valid_score(score: i64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

pub fn clamp_score(score: i64) -> i64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}
