use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::score_event::{ScoreEvent, is_valid_score};

/// High-level business logic for the `edit` command.
pub struct EditLogic;

impl EditLogic {
    /// Change the score of a recorded event. Returns the event as it was
    /// before the change.
    pub fn apply(
        store: &mut dyn RecordStore,
        season_id: &str,
        event_id: &str,
        score: i64,
    ) -> AppResult<ScoreEvent> {
        if !is_valid_score(score) {
            return Err(AppError::InvalidScore(score));
        }

        let before = find_event(store, season_id, event_id)?;
        if before.is_sentinel() {
            return Err(AppError::SentinelEvent);
        }

        store.update_event_score(season_id, event_id, score)?;
        Ok(before)
    }
}

pub(crate) fn find_event(
    store: &mut dyn RecordStore,
    season_id: &str,
    event_id: &str,
) -> AppResult<ScoreEvent> {
    store
        .load_events(season_id)?
        .into_iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::season::SeasonLogic;
    use crate::db::store::MemoryStore;

    fn seeded() -> (MemoryStore, String) {
        let mut store = MemoryStore::new();
        let s = SeasonLogic::create(&mut store, "S", 1000, 1).unwrap();
        store
            .insert_event(&s.id, &ScoreEvent::new("e1".into(), 1010, "2025-03-01 10:00".into(), 5))
            .unwrap();
        (store, s.id)
    }

    #[test]
    fn updates_score_and_returns_previous_state() {
        let (mut store, sid) = seeded();
        let before = EditLogic::apply(&mut store, &sid, "e1", 1200).unwrap();
        assert_eq!(before.score, 1010);
        assert_eq!(find_event(&mut store, &sid, "e1").unwrap().score, 1200);
    }

    #[test]
    fn rejects_invalid_score_before_lookup() {
        let (mut store, sid) = seeded();
        assert!(matches!(
            EditLogic::apply(&mut store, &sid, "missing", 10_001),
            Err(AppError::InvalidScore(10_001))
        ));
    }

    #[test]
    fn initial_event_and_unknown_ids_are_rejected() {
        let (mut store, sid) = seeded();
        let initial = format!("initial_{sid}");
        assert!(matches!(
            EditLogic::apply(&mut store, &sid, &initial, 5),
            Err(AppError::SentinelEvent)
        ));
        assert!(matches!(
            EditLogic::apply(&mut store, &sid, "nope", 5),
            Err(AppError::EventNotFound(_))
        ));
    }
}
