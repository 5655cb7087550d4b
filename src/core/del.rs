use crate::core::edit::find_event;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::score_event::ScoreEvent;

/// High-level business logic for the `del` command.
pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one recorded event. The initial event of a season can only go
    /// away together with the season.
    pub fn apply(
        store: &mut dyn RecordStore,
        season_id: &str,
        event_id: &str,
    ) -> AppResult<ScoreEvent> {
        let event = find_event(store, season_id, event_id)?;
        if event.is_sentinel() {
            return Err(AppError::SentinelEvent);
        }

        store.delete_event(season_id, event_id)?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::season::SeasonLogic;
    use crate::db::store::MemoryStore;

    #[test]
    fn deletes_event_but_never_the_initial_one() {
        let mut store = MemoryStore::new();
        let s = SeasonLogic::create(&mut store, "S", 1000, 1).unwrap();
        store
            .insert_event(&s.id, &ScoreEvent::new("e1".into(), 1010, "2025-03-01 10:00".into(), 5))
            .unwrap();

        let removed = DeleteLogic::apply(&mut store, &s.id, "e1").unwrap();
        assert_eq!(removed.score, 1010);
        assert_eq!(store.load_events(&s.id).unwrap().len(), 1);

        assert!(matches!(
            DeleteLogic::apply(&mut store, &s.id, "e1"),
            Err(AppError::EventNotFound(_))
        ));
        assert!(matches!(
            DeleteLogic::apply(&mut store, &s.id, &format!("initial_{}", s.id)),
            Err(AppError::SentinelEvent)
        ));
    }
}
