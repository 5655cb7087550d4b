//! Escalating score suggestions driven by the current win streak.

use crate::core::calculator::streak::chronological_order;
use crate::models::outcome::Outcome;
use crate::models::score_event::{ScoreEvent, without_sentinel};
use serde::Serialize;

/// Deltas offered as one-tap shortcuts when recording a score.
pub const QUICK_DELTAS: [i64; 6] = [10, 13, 16, 19, 22, -10];

pub const BASE_WIN_DELTA: i64 = 10;
pub const LOSE_DELTA: i64 = -10;

/// Win delta indexed by the current streak length; longer streaks use the last entry.
const WIN_DELTAS: [i64; 5] = [10, 13, 16, 19, 22];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakState {
    pub win_streak: u32,
    pub last_outcome: Option<Outcome>,
}

/// Current win streak, scanning backward from the newest event.
///
/// Ties are skipped. A loss as the most recent outcome yields a zero streak;
/// otherwise consecutive wins are counted until the first loss. Initial events
/// are ignored, and a single event cannot establish a streak.
pub fn current_streak(events: &[ScoreEvent]) -> StreakState {
    let events = without_sentinel(events);
    if events.len() <= 1 {
        return StreakState::default();
    }

    let order = chronological_order(&events);

    let mut state = StreakState::default();
    for pair in order.windows(2).rev() {
        let (prev, curr) = (&events[pair[0]], &events[pair[1]]);
        match Outcome::between(prev.score, curr.score) {
            None => continue,
            Some(Outcome::Lose) => {
                if state.last_outcome.is_none() {
                    state.last_outcome = Some(Outcome::Lose);
                }
                break;
            }
            Some(Outcome::Win) => {
                state.win_streak += 1;
                state.last_outcome = Some(Outcome::Win);
            }
        }
    }

    state
}

pub fn win_delta(state: &StreakState) -> i64 {
    match state.last_outcome {
        Some(Outcome::Win) => {
            let idx = (state.win_streak as usize).min(WIN_DELTAS.len() - 1);
            WIN_DELTAS[idx]
        }
        _ => BASE_WIN_DELTA,
    }
}

pub fn suggest_delta(action: Action, state: &StreakState) -> i64 {
    match action {
        Action::Win => win_delta(state),
        Action::Lose => LOSE_DELTA,
    }
}
