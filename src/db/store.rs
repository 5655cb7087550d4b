//! Record store abstraction.
//!
//! Logic objects take a `RecordStore` instead of reaching into a global
//! database, so they run the same against SQLite (`DbPool`) and the
//! in-memory `MemoryStore` used by tests.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::score_event::ScoreEvent;
use crate::models::season::Season;
use std::collections::HashMap;

pub trait RecordStore {
    /// Seasons in creation order.
    fn list_seasons(&mut self) -> AppResult<Vec<Season>>;
    fn find_season(&mut self, id: &str) -> AppResult<Option<Season>>;
    fn insert_season(&mut self, season: &Season) -> AppResult<()>;
    fn rename_season(&mut self, id: &str, name: &str) -> AppResult<()>;
    /// Removes the season and all its events.
    fn delete_season(&mut self, id: &str) -> AppResult<()>;

    fn current_season_id(&mut self) -> AppResult<Option<String>>;
    fn set_current_season_id(&mut self, id: Option<&str>) -> AppResult<()>;

    /// Every event of the season, initial event included, unordered.
    fn load_events(&mut self, season_id: &str) -> AppResult<Vec<ScoreEvent>>;
    fn insert_event(&mut self, season_id: &str, event: &ScoreEvent) -> AppResult<()>;
    fn update_event_score(&mut self, season_id: &str, event_id: &str, score: i64)
    -> AppResult<()>;
    fn delete_event(&mut self, season_id: &str, event_id: &str) -> AppResult<()>;

    /// All-or-nothing insert used by import.
    fn insert_batch(
        &mut self,
        seasons: &[Season],
        events: &[(String, ScoreEvent)],
    ) -> AppResult<()>;
}

impl RecordStore for DbPool {
    fn list_seasons(&mut self) -> AppResult<Vec<Season>> {
        queries::load_seasons(&self.conn)
    }

    fn find_season(&mut self, id: &str) -> AppResult<Option<Season>> {
        queries::find_season(&self.conn, id)
    }

    fn insert_season(&mut self, season: &Season) -> AppResult<()> {
        queries::insert_season(&self.conn, season)
    }

    fn rename_season(&mut self, id: &str, name: &str) -> AppResult<()> {
        queries::rename_season(&self.conn, id, name)
    }

    fn delete_season(&mut self, id: &str) -> AppResult<()> {
        queries::delete_season(&mut self.conn, id)
    }

    fn current_season_id(&mut self) -> AppResult<Option<String>> {
        queries::load_current_season_id(&self.conn)
    }

    fn set_current_season_id(&mut self, id: Option<&str>) -> AppResult<()> {
        queries::save_current_season_id(&self.conn, id)
    }

    fn load_events(&mut self, season_id: &str) -> AppResult<Vec<ScoreEvent>> {
        queries::load_events(&self.conn, season_id)
    }

    fn insert_event(&mut self, season_id: &str, event: &ScoreEvent) -> AppResult<()> {
        queries::insert_event(&self.conn, season_id, event)
    }

    fn update_event_score(
        &mut self,
        season_id: &str,
        event_id: &str,
        score: i64,
    ) -> AppResult<()> {
        queries::update_event_score(&self.conn, season_id, event_id, score)
    }

    fn delete_event(&mut self, season_id: &str, event_id: &str) -> AppResult<()> {
        queries::delete_event(&self.conn, season_id, event_id)
    }

    fn insert_batch(
        &mut self,
        seasons: &[Season],
        events: &[(String, ScoreEvent)],
    ) -> AppResult<()> {
        queries::insert_batch(&mut self.conn, seasons, events)
    }
}

/// Volatile store backed by plain collections.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    seasons: Vec<Season>,
    events: HashMap<String, Vec<ScoreEvent>>,
    current: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn season_events_mut(&mut self, season_id: &str) -> AppResult<&mut Vec<ScoreEvent>> {
        self.events
            .get_mut(season_id)
            .ok_or_else(|| AppError::SeasonNotFound(season_id.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn list_seasons(&mut self) -> AppResult<Vec<Season>> {
        Ok(self.seasons.clone())
    }

    fn find_season(&mut self, id: &str) -> AppResult<Option<Season>> {
        Ok(self.seasons.iter().find(|s| s.id == id).cloned())
    }

    fn insert_season(&mut self, season: &Season) -> AppResult<()> {
        if self.seasons.iter().any(|s| s.id == season.id) {
            return Err(AppError::Other(format!("duplicate season id {}", season.id)));
        }
        self.seasons.push(season.clone());
        self.events.entry(season.id.clone()).or_default();
        Ok(())
    }

    fn rename_season(&mut self, id: &str, name: &str) -> AppResult<()> {
        let season = self
            .seasons
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::SeasonNotFound(id.to_string()))?;
        season.name = name.to_string();
        Ok(())
    }

    fn delete_season(&mut self, id: &str) -> AppResult<()> {
        let before = self.seasons.len();
        self.seasons.retain(|s| s.id != id);
        if self.seasons.len() == before {
            return Err(AppError::SeasonNotFound(id.to_string()));
        }
        self.events.remove(id);
        Ok(())
    }

    fn current_season_id(&mut self) -> AppResult<Option<String>> {
        Ok(self.current.clone())
    }

    fn set_current_season_id(&mut self, id: Option<&str>) -> AppResult<()> {
        self.current = id.filter(|s| !s.is_empty()).map(str::to_string);
        Ok(())
    }

    fn load_events(&mut self, season_id: &str) -> AppResult<Vec<ScoreEvent>> {
        Ok(self.events.get(season_id).cloned().unwrap_or_default())
    }

    fn insert_event(&mut self, season_id: &str, event: &ScoreEvent) -> AppResult<()> {
        let events = self.season_events_mut(season_id)?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(AppError::Other(format!("duplicate event id {}", event.id)));
        }
        events.push(event.clone());
        Ok(())
    }

    fn update_event_score(
        &mut self,
        season_id: &str,
        event_id: &str,
        score: i64,
    ) -> AppResult<()> {
        let ev = self
            .season_events_mut(season_id)?
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))?;
        ev.score = score;
        Ok(())
    }

    fn delete_event(&mut self, season_id: &str, event_id: &str) -> AppResult<()> {
        let events = self.season_events_mut(season_id)?;
        let before = events.len();
        events.retain(|e| e.id != event_id);
        if events.len() == before {
            return Err(AppError::EventNotFound(event_id.to_string()));
        }
        Ok(())
    }

    fn insert_batch(
        &mut self,
        seasons: &[Season],
        events: &[(String, ScoreEvent)],
    ) -> AppResult<()> {
        // apply on a copy so a failure leaves the store untouched
        let mut staged = self.clone();
        for s in seasons {
            staged.insert_season(s)?;
        }
        for (season_id, ev) in events {
            staged.insert_event(season_id, ev)?;
        }
        *self = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn season(id: &str) -> Season {
        Season::new(id.into(), &format!("S{id}"), 1000, "2025-01-01T00:00:00Z".into())
    }

    fn sqlite_store() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn exercise(store: &mut dyn RecordStore) {
        store.insert_season(&season("1")).unwrap();
        store.insert_season(&season("2")).unwrap();
        store
            .insert_event("1", &ScoreEvent::initial("1", 1000))
            .unwrap();
        store
            .insert_event("1", &ScoreEvent::new("e1".into(), 1010, "2025-03-01 10:00".into(), 5))
            .unwrap();

        let ids: Vec<String> = store.list_seasons().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1", "2"]);

        store.update_event_score("1", "e1", 1200).unwrap();
        let events = store.load_events("1").unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.id == "e1" && e.score == 1200));

        assert!(matches!(
            store.update_event_score("1", "nope", 1),
            Err(AppError::EventNotFound(_))
        ));

        store.set_current_season_id(Some("1")).unwrap();
        assert_eq!(store.current_season_id().unwrap().as_deref(), Some("1"));
        store.set_current_season_id(None).unwrap();
        assert_eq!(store.current_season_id().unwrap(), None);

        store.rename_season("2", "Renamed").unwrap();
        assert_eq!(store.find_season("2").unwrap().unwrap().name, "Renamed");

        store.delete_season("1").unwrap();
        assert!(store.find_season("1").unwrap().is_none());
        assert!(store.load_events("1").unwrap().is_empty());
        assert!(matches!(
            store.delete_season("1"),
            Err(AppError::SeasonNotFound(_))
        ));
    }

    #[test]
    fn sqlite_store_behaves_like_a_record_store() {
        exercise(&mut sqlite_store());
    }

    #[test]
    fn memory_store_behaves_like_a_record_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn failed_batch_leaves_store_untouched() {
        let mut sqlite = sqlite_store();
        let mut memory = MemoryStore::new();
        let stores: [&mut dyn RecordStore; 2] = [&mut sqlite, &mut memory];

        for store in stores {
            store.insert_season(&season("1")).unwrap();
            // second season collides with the existing one
            let result = store.insert_batch(
                &[season("9"), season("1")],
                &[("9".into(), ScoreEvent::initial("9", 5))],
            );
            assert!(result.is_err());
            assert!(store.find_season("9").unwrap().is_none());
            assert_eq!(store.list_seasons().unwrap().len(), 1);
        }
    }
}
