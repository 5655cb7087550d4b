//! Streak analysis: running win/lose runs over the chronological event
//! sequence, labelled only at their local peak.

use crate::models::outcome::Outcome;
use crate::models::score_event::ScoreEvent;
use crate::models::streak::{AnnotatedEvent, StreakAnnotation};

/// Running run length and direction at each position of a sorted sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunState {
    kind: Option<Outcome>,
    count: u32,
}

/// Indices of `events` in chronological order. The sort is stable, so events
/// sharing a timestamp keep their input order.
pub(crate) fn chronological_order(events: &[ScoreEvent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| events[i].timestamp);
    order
}

fn run_states(sorted: &[&ScoreEvent]) -> Vec<RunState> {
    let mut states = vec![RunState::default(); sorted.len()];

    for i in 1..sorted.len() {
        let Some(kind) = Outcome::between(sorted[i - 1].score, sorted[i].score) else {
            // tie: no outcome, count stays 0
            continue;
        };

        let prev = states[i - 1];
        let count = if prev.kind == Some(kind) {
            prev.count + 1
        } else {
            1
        };

        states[i] = RunState {
            kind: Some(kind),
            count,
        };
    }

    states
}

/// Compute one annotation per input event, returned in input order.
///
/// Events must not include the season's initial event. A streak is labelled
/// at an index whose run length is > 0 and which is either the last index or
/// followed by a run length that is not greater than its own.
pub fn analyze_streaks(events: &[ScoreEvent]) -> Vec<StreakAnnotation> {
    let mut annotations = vec![StreakAnnotation::default(); events.len()];

    if events.len() <= 1 {
        return annotations;
    }

    let order = chronological_order(events);
    let sorted: Vec<&ScoreEvent> = order.iter().map(|&i| &events[i]).collect();
    let states = run_states(&sorted);

    for (pos, state) in states.iter().enumerate() {
        let Some(kind) = state.kind else {
            continue;
        };
        if state.count == 0 {
            continue;
        }

        let is_peak = pos == states.len() - 1 || states[pos + 1].count <= state.count;
        if is_peak {
            annotations[order[pos]] = StreakAnnotation::peak(kind, state.count);
        }
    }

    annotations
}

/// Convenience wrapper pairing each event with its annotation.
pub fn annotate(events: &[ScoreEvent]) -> Vec<AnnotatedEvent> {
    analyze_streaks(events)
        .into_iter()
        .zip(events.iter().cloned())
        .map(|(streak, event)| AnnotatedEvent { event, streak })
        .collect()
}
