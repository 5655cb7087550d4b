use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::score_event::{ScoreEvent, is_valid_score};
use crate::models::season::{Season, SeasonOverview};
use chrono::{DateTime, SecondsFormat};

/// Epoch-millis id, bumped by one until `taken` no longer matches.
pub(crate) fn unique_millis_id(now_ms: i64, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = now_ms;
    while taken(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

fn iso_from_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn validate_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidSeasonName(
            "name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// High-level business logic for the `season` command.
pub struct SeasonLogic;

impl SeasonLogic {
    /// Create a season together with its initial event. The first season
    /// ever created becomes the current one.
    pub fn create(
        store: &mut dyn RecordStore,
        name: &str,
        initial_score: i64,
        now_ms: i64,
    ) -> AppResult<Season> {
        let name = validate_name(name)?;
        if !is_valid_score(initial_score) {
            return Err(AppError::InvalidScore(initial_score));
        }

        let existing: Vec<String> = store.list_seasons()?.into_iter().map(|s| s.id).collect();
        let id = unique_millis_id(now_ms, |c| existing.iter().any(|e| e == c));

        let season = Season::new(id, name, initial_score, iso_from_millis(now_ms));
        let initial = ScoreEvent::initial(&season.id, initial_score);

        store.insert_batch(
            std::slice::from_ref(&season),
            &[(season.id.clone(), initial)],
        )?;

        if store.current_season_id()?.is_none() {
            store.set_current_season_id(Some(&season.id))?;
        }

        Ok(season)
    }

    pub fn list(store: &mut dyn RecordStore) -> AppResult<Vec<SeasonOverview>> {
        let current = store.current_season_id()?;
        let mut out = Vec::new();

        for season in store.list_seasons()? {
            let record_count = store
                .load_events(&season.id)?
                .iter()
                .filter(|e| !e.is_sentinel())
                .count();
            let is_current = current.as_deref() == Some(season.id.as_str());
            out.push(SeasonOverview {
                season,
                record_count,
                is_current,
            });
        }

        Ok(out)
    }

    pub fn select(store: &mut dyn RecordStore, id: &str) -> AppResult<Season> {
        let season = store
            .find_season(id)?
            .ok_or_else(|| AppError::SeasonNotFound(id.to_string()))?;
        store.set_current_season_id(Some(&season.id))?;
        Ok(season)
    }

    pub fn rename(store: &mut dyn RecordStore, id: &str, name: &str) -> AppResult<Season> {
        let name = validate_name(name)?;
        store.rename_season(id, name)?;
        store
            .find_season(id)?
            .ok_or_else(|| AppError::SeasonNotFound(id.to_string()))
    }

    /// Delete a season and its events. Returns the current season id after
    /// the deletion.
    pub fn delete(store: &mut dyn RecordStore, id: &str) -> AppResult<Option<String>> {
        store.delete_season(id)?;

        let current = store.current_season_id()?;
        if current.as_deref() == Some(id) {
            let next = store.list_seasons()?.into_iter().next().map(|s| s.id);
            store.set_current_season_id(next.as_deref())?;
            return Ok(next);
        }

        Ok(current)
    }

    /// The season named by `--season`, or the current one.
    pub fn resolve(store: &mut dyn RecordStore, explicit: Option<&str>) -> AppResult<Season> {
        let id = match explicit {
            Some(id) => id.to_string(),
            None => store.current_season_id()?.ok_or(AppError::NoCurrentSeason)?,
        };

        store
            .find_season(&id)?
            .ok_or(AppError::SeasonNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;

    const NOW: i64 = 1_740_800_000_000;

    #[test]
    fn first_season_becomes_current_and_is_seeded() {
        let mut store = MemoryStore::new();
        let s1 = SeasonLogic::create(&mut store, "  Spring  ", 1200, NOW).unwrap();
        let s2 = SeasonLogic::create(&mut store, "Summer", 1000, NOW).unwrap();

        assert_eq!(s1.name, "Spring");
        assert_eq!(s1.id, NOW.to_string());
        assert_eq!(s2.id, (NOW + 1).to_string());
        assert_eq!(s1.create_time, "2025-03-01T03:33:20.000Z");
        assert_eq!(store.current_season_id().unwrap(), Some(s1.id.clone()));

        let events = store.load_events(&s1.id).unwrap();
        assert_eq!(events, vec![ScoreEvent::initial(&s1.id, 1200)]);
    }

    #[test]
    fn rejects_blank_names_and_out_of_range_scores() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            SeasonLogic::create(&mut store, "   ", 0, NOW),
            Err(AppError::InvalidSeasonName(_))
        ));
        assert!(matches!(
            SeasonLogic::create(&mut store, "S", 10_001, NOW),
            Err(AppError::InvalidScore(10_001))
        ));
        assert!(store.list_seasons().unwrap().is_empty());
    }

    #[test]
    fn list_counts_only_real_events() {
        let mut store = MemoryStore::new();
        let s = SeasonLogic::create(&mut store, "S", 1000, NOW).unwrap();
        store
            .insert_event(&s.id, &ScoreEvent::new("e".into(), 1010, "2025-03-01 10:00".into(), 1))
            .unwrap();

        let list = SeasonLogic::list(&mut store).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].record_count, 1);
        assert!(list[0].is_current);
    }

    #[test]
    fn deleting_current_moves_pointer_to_first_remaining() {
        let mut store = MemoryStore::new();
        let a = SeasonLogic::create(&mut store, "A", 0, NOW).unwrap();
        let b = SeasonLogic::create(&mut store, "B", 0, NOW).unwrap();
        let c = SeasonLogic::create(&mut store, "C", 0, NOW).unwrap();

        SeasonLogic::select(&mut store, &c.id).unwrap();
        // deleting a non-current season keeps the pointer
        assert_eq!(SeasonLogic::delete(&mut store, &a.id).unwrap(), Some(c.id.clone()));
        assert_eq!(SeasonLogic::delete(&mut store, &c.id).unwrap(), Some(b.id.clone()));
        assert_eq!(SeasonLogic::delete(&mut store, &b.id).unwrap(), None);
        assert_eq!(store.current_season_id().unwrap(), None);
    }

    #[test]
    fn resolve_prefers_explicit_then_current() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            SeasonLogic::resolve(&mut store, None),
            Err(AppError::NoCurrentSeason)
        ));

        let a = SeasonLogic::create(&mut store, "A", 0, NOW).unwrap();
        let b = SeasonLogic::create(&mut store, "B", 0, NOW).unwrap();
        assert_eq!(SeasonLogic::resolve(&mut store, None).unwrap().id, a.id);
        assert_eq!(SeasonLogic::resolve(&mut store, Some(&b.id)).unwrap().id, b.id);
        assert!(matches!(
            SeasonLogic::resolve(&mut store, Some("missing")),
            Err(AppError::SeasonNotFound(_))
        ));
    }

    #[test]
    fn rename_validates_and_returns_updated_season() {
        let mut store = MemoryStore::new();
        let a = SeasonLogic::create(&mut store, "A", 0, NOW).unwrap();
        assert_eq!(SeasonLogic::rename(&mut store, &a.id, " New ").unwrap().name, "New");
        assert!(SeasonLogic::rename(&mut store, &a.id, "").is_err());
        assert!(matches!(
            SeasonLogic::rename(&mut store, "nope", "X"),
            Err(AppError::SeasonNotFound(_))
        ));
    }
}
