use crate::core::season::{SeasonLogic, unique_millis_id};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::csv::{CsvKind, detect_kind, parse_full, parse_season};
use crate::models::score_event::ScoreEvent;
use crate::models::season::Season;
use crate::utils::time::Zone;
use chrono::{DateTime, SecondsFormat};
use std::collections::{HashMap, HashSet};

/// What an import added to the store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub kind: Option<CsvKind>,
    pub seasons_added: usize,
    pub events_added: usize,
    /// Rows already present (same id, or same time for single-season files).
    pub skipped: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Import a CSV text, choosing the layout from its header. Single-season
    /// files go into `target` (or the current season).
    pub fn import_text(
        store: &mut dyn RecordStore,
        text: &str,
        target: Option<&str>,
        zone: &Zone,
        now_ms: i64,
    ) -> AppResult<ImportSummary> {
        match detect_kind(text)? {
            CsvKind::Full => {
                if let Some(id) = target {
                    tracing::warn!("full export imported as-is; --season {id} ignored");
                }
                Self::import_full(store, text, zone, now_ms)
            }
            CsvKind::Season => {
                let season = SeasonLogic::resolve(store, target)?;
                Self::import_season(store, &season, text, zone, now_ms)
            }
        }
    }

    /// Merge a full export into the store. Seasons already present keep their
    /// name and initial score; events are deduplicated by id within a season.
    pub fn import_full(
        store: &mut dyn RecordStore,
        text: &str,
        zone: &Zone,
        now_ms: i64,
    ) -> AppResult<ImportSummary> {
        let rows = parse_full(text, zone)?;

        let mut existing: HashMap<String, Vec<ScoreEvent>> = HashMap::new();
        for s in store.list_seasons()? {
            let events = store.load_events(&s.id)?;
            existing.insert(s.id, events);
        }

        let create_time = DateTime::from_timestamp_millis(now_ms)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut new_seasons: Vec<Season> = Vec::new();
        let mut new_events: Vec<(String, ScoreEvent)> = Vec::new();
        let mut seen: HashMap<String, HashSet<String>> = existing
            .iter()
            .map(|(sid, evs)| (sid.clone(), evs.iter().map(|e| e.id.clone()).collect()))
            .collect();
        let mut times: HashMap<String, HashSet<String>> = existing
            .iter()
            .map(|(sid, evs)| {
                let set = evs
                    .iter()
                    .filter(|e| !e.is_sentinel())
                    .map(|e| e.time.clone())
                    .collect();
                (sid.clone(), set)
            })
            .collect();
        let mut skipped = 0;

        for row in rows {
            if !seen.contains_key(&row.season_id) {
                new_seasons.push(Season::new(
                    row.season_id.clone(),
                    &row.season_name,
                    row.initial_score,
                    create_time.clone(),
                ));
                seen.insert(row.season_id.clone(), HashSet::new());
                times.insert(row.season_id.clone(), HashSet::new());
            }

            let Some(event) = row.event else { continue };

            let ids = seen.entry(row.season_id.clone()).or_default();
            let season_times = times.entry(row.season_id.clone()).or_default();
            if ids.contains(&event.id) {
                skipped += 1;
                continue;
            }
            if !event.is_sentinel() && season_times.contains(&event.time) {
                tracing::warn!(
                    "line {}: event {} skipped, season {} already has an event at {}",
                    row.line,
                    event.id,
                    row.season_id,
                    event.time
                );
                skipped += 1;
                continue;
            }

            ids.insert(event.id.clone());
            if !event.is_sentinel() {
                season_times.insert(event.time.clone());
            }
            new_events.push((row.season_id, event));
        }

        // every season created here gets an initial event, even if the file had none
        for s in &new_seasons {
            if !new_events
                .iter()
                .any(|(sid, e)| sid == &s.id && e.is_sentinel())
            {
                new_events.push((s.id.clone(), ScoreEvent::initial(&s.id, s.initial_score)));
            }
        }

        let events_added = new_events.iter().filter(|(_, e)| !e.is_sentinel()).count();
        store.insert_batch(&new_seasons, &new_events)?;

        if store.current_season_id()?.is_none()
            && let Some(first) = store.list_seasons()?.first()
        {
            store.set_current_season_id(Some(&first.id))?;
        }

        Ok(ImportSummary {
            kind: Some(CsvKind::Full),
            seasons_added: new_seasons.len(),
            events_added,
            skipped,
        })
    }

    /// Append a single-season export to `season`, generating ids. Rows whose
    /// time already exists in the season are skipped.
    pub fn import_season(
        store: &mut dyn RecordStore,
        season: &Season,
        text: &str,
        zone: &Zone,
        now_ms: i64,
    ) -> AppResult<ImportSummary> {
        let rows = parse_season(text, zone)?;
        let events = store.load_events(&season.id)?;

        let mut ids: HashSet<String> = events.iter().map(|e| e.id.clone()).collect();
        let mut times: HashSet<String> = events
            .iter()
            .filter(|e| !e.is_sentinel())
            .map(|e| e.time.clone())
            .collect();

        let mut new_events = Vec::new();
        let mut skipped = 0;

        for row in rows {
            if !times.insert(row.time.clone()) {
                skipped += 1;
                continue;
            }
            let id = unique_millis_id(now_ms, |c| ids.contains(c));
            ids.insert(id.clone());
            new_events.push((
                season.id.clone(),
                ScoreEvent::new(id, row.score, row.time, row.timestamp),
            ));
        }

        store.insert_batch(&[], &new_events)?;

        Ok(ImportSummary {
            kind: Some(CsvKind::Season),
            seasons_added: 0,
            events_added: new_events.len(),
            skipped,
        })
    }
}

/// Reject a target season id before reading anything when it is unknown.
pub fn check_target(store: &mut dyn RecordStore, target: Option<&str>) -> AppResult<()> {
    if let Some(id) = target
        && store.find_season(id)?.is_none()
    {
        return Err(AppError::SeasonNotFound(id.to_string()));
    }
    Ok(())
}
