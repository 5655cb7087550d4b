use serde::Serialize;
use std::fmt;

/// Result of one event compared with its chronological predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    /// Higher score wins, lower loses, equal scores yield no outcome.
    pub fn between(previous: i64, current: i64) -> Option<Self> {
        if current > previous {
            Some(Outcome::Win)
        } else if current < previous {
            Some(Outcome::Lose)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
