use crate::core::calculator::suggest::{self, Action};
use crate::core::logic::Core;
use crate::core::season::unique_millis_id;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::score_event::{ScoreEvent, clamp_score, is_valid_score};
use crate::models::season::Season;
use crate::utils::time::{Zone, resolve_optional_event_time};

/// How the new score is derived from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// Previous score plus the streak-based win delta.
    Win,
    /// Previous score minus ten.
    Lose,
    Delta(i64),
    Absolute(i64),
}

/// Result of a successful `add`.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub event: ScoreEvent,
    pub previous: i64,
    pub delta: i64,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(
        store: &mut dyn RecordStore,
        season: &Season,
        change: ScoreChange,
        time: Option<&str>,
        zone: &Zone,
        now_ms: i64,
    ) -> AppResult<AddOutcome> {
        let events = store.load_events(&season.id)?;
        let previous = Core::last_score(&events, season.initial_score);

        // ------------------------------------------------
        // Time (one event per minute and season)
        // ------------------------------------------------
        let (time, timestamp) = resolve_optional_event_time(time, zone)?;
        if events.iter().any(|e| !e.is_sentinel() && e.time == time) {
            return Err(AppError::TimeCollision(time));
        }

        // relative changes may not predate the latest event
        if !matches!(change, ScoreChange::Absolute(_))
            && let Some(latest) = events
                .iter()
                .filter(|e| !e.is_sentinel())
                .max_by_key(|e| e.timestamp)
            && timestamp < latest.timestamp
        {
            return Err(AppError::BackdatedChange {
                time,
                latest: latest.time.clone(),
            });
        }

        // ------------------------------------------------
        // Score
        // ------------------------------------------------
        let score = match change {
            ScoreChange::Win => {
                let state = suggest::current_streak(&events);
                clamp_score(previous + suggest::suggest_delta(Action::Win, &state))
            }
            ScoreChange::Lose => {
                let state = suggest::current_streak(&events);
                clamp_score(previous + suggest::suggest_delta(Action::Lose, &state))
            }
            ScoreChange::Delta(d) => clamp_score(previous.saturating_add(d)),
            ScoreChange::Absolute(s) => {
                if !is_valid_score(s) {
                    return Err(AppError::InvalidScore(s));
                }
                s
            }
        };

        let id = unique_millis_id(now_ms, |c| events.iter().any(|e| e.id == c));
        let event = ScoreEvent::new(id, score, time, timestamp);
        store.insert_event(&season.id, &event)?;

        Ok(AddOutcome {
            delta: event.score - previous,
            event,
            previous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::season::SeasonLogic;
    use crate::db::store::MemoryStore;

    const NOW: i64 = 1_740_800_000_000;

    fn setup(initial: i64) -> (MemoryStore, Season, Zone) {
        let mut store = MemoryStore::new();
        let season = SeasonLogic::create(&mut store, "S", initial, NOW).unwrap();
        (store, season, Zone::parse("Asia/Shanghai").unwrap())
    }

    fn add(
        store: &mut MemoryStore,
        season: &Season,
        zone: &Zone,
        change: ScoreChange,
        time: &str,
    ) -> AppResult<AddOutcome> {
        AddLogic::apply(store, season, change, Some(time), zone, NOW)
    }

    #[test]
    fn wins_escalate_with_the_streak() {
        let (mut store, season, zone) = setup(1000);

        let deltas: Vec<i64> = ["2025-03-01 10:00", "2025-03-01 11:00", "2025-03-01 12:00"]
            .iter()
            .map(|t| add(&mut store, &season, &zone, ScoreChange::Win, t).unwrap().delta)
            .collect();

        // the first recorded event has no predecessor to form a streak with
        assert_eq!(deltas, vec![10, 10, 13]);
    }

    #[test]
    fn first_event_starts_from_initial_score() {
        let (mut store, season, zone) = setup(1500);
        let out = add(&mut store, &season, &zone, ScoreChange::Lose, "2025-03-01 10:00").unwrap();
        assert_eq!(out.previous, 1500);
        assert_eq!(out.event.score, 1490);
        assert_eq!(out.event.timestamp, 1_740_794_400_000);
    }

    #[test]
    fn deltas_are_clamped_to_the_valid_range() {
        let (mut store, season, zone) = setup(5);
        let out = add(&mut store, &season, &zone, ScoreChange::Lose, "2025-03-01 10:00").unwrap();
        assert_eq!(out.event.score, 0);

        let out = add(&mut store, &season, &zone, ScoreChange::Delta(20_000), "2025-03-01 11:00")
            .unwrap();
        assert_eq!(out.event.score, 10_000);
    }

    #[test]
    fn absolute_score_is_validated() {
        let (mut store, season, zone) = setup(1000);
        assert!(matches!(
            add(&mut store, &season, &zone, ScoreChange::Absolute(-1), "2025-03-01 10:00"),
            Err(AppError::InvalidScore(-1))
        ));
        assert!(matches!(
            add(&mut store, &season, &zone, ScoreChange::Absolute(10_001), "2025-03-01 10:00"),
            Err(AppError::InvalidScore(10_001))
        ));
        assert_eq!(store.load_events(&season.id).unwrap().len(), 1);
    }

    #[test]
    fn same_time_is_rejected() {
        let (mut store, season, zone) = setup(1000);
        add(&mut store, &season, &zone, ScoreChange::Absolute(1100), "2025-03-01 10:00").unwrap();

        let err = add(&mut store, &season, &zone, ScoreChange::Win, "2025-03-01T10:00").unwrap_err();
        assert!(matches!(err, AppError::TimeCollision(t) if t == "2025-03-01 10:00"));
        assert_eq!(store.load_events(&season.id).unwrap().len(), 2);
    }

    #[test]
    fn malformed_time_is_rejected() {
        let (mut store, season, zone) = setup(1000);
        assert!(matches!(
            add(&mut store, &season, &zone, ScoreChange::Win, "01/03/2025 10:00"),
            Err(AppError::InvalidTime(_))
        ));
    }

    #[test]
    fn ids_stay_unique_when_clock_repeats() {
        let (mut store, season, zone) = setup(1000);
        let a = add(&mut store, &season, &zone, ScoreChange::Win, "2025-03-01 10:00").unwrap();
        let b = add(&mut store, &season, &zone, ScoreChange::Win, "2025-03-01 10:01").unwrap();
        assert_ne!(a.event.id, b.event.id);
    }

    #[test]
    fn relative_changes_cannot_predate_the_latest_event() {
        let (mut store, season, zone) = setup(1000);
        add(&mut store, &season, &zone, ScoreChange::Win, "2025-03-01 10:00").unwrap();
        add(&mut store, &season, &zone, ScoreChange::Win, "2025-03-01 12:00").unwrap();

        for change in [ScoreChange::Win, ScoreChange::Lose, ScoreChange::Delta(13)] {
            let err = add(&mut store, &season, &zone, change, "2025-03-01 11:00").unwrap_err();
            assert!(matches!(
                err,
                AppError::BackdatedChange { ref time, ref latest }
                    if time == "2025-03-01 11:00" && latest == "2025-03-01 12:00"
            ));
        }
        assert_eq!(store.load_events(&season.id).unwrap().len(), 3);

        // an explicit score may fill a gap
        let out = add(&mut store, &season, &zone, ScoreChange::Absolute(1015), "2025-03-01 11:00")
            .unwrap();
        assert_eq!(out.event.score, 1015);
    }
}
