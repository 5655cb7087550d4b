use super::outcome::Outcome;
use super::score_event::ScoreEvent;
use serde::Serialize;

/// Derived, never persisted: label shown on the last event of a streak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakAnnotation {
    pub label: String,
    pub kind: Option<Outcome>,
}

impl StreakAnnotation {
    pub fn peak(kind: Outcome, length: u32) -> Self {
        let label = match kind {
            Outcome::Win => format!("连胜{length}场"),
            Outcome::Lose => format!("连败{length}场"),
        };
        Self {
            label,
            kind: Some(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }
}

/// An event paired with its streak annotation.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedEvent {
    pub event: ScoreEvent,
    pub streak: StreakAnnotation,
}
