// src/export/logic.rs

use crate::core::logic::{Core, ViewMode};
use crate::core::season::SeasonLogic;
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::{full_csv, full_footer, season_csv, season_footer, view_csv};
use crate::export::json::to_json;
use crate::export::model::{SeasonDump, SeasonExport, StoreDump, ViewExport};
use crate::utils::time::Zone;
use std::fs;
use std::path::Path;

/// What to export.
///
/// - no season and no view: the whole store
/// - a season (or the current one when only a view is given): that season
/// - a view: only the derived data of that view
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub season: Option<&'a str>,
    pub view: Option<ViewMode>,
    pub window: usize,
    pub zone: &'a Zone,
    pub now_ms: i64,
}

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the file contents for `req`.
    pub fn render(store: &mut dyn RecordStore, req: &ExportRequest) -> AppResult<String> {
        if req.season.is_none() && req.view.is_none() {
            return Self::render_store(store, req);
        }

        let season = SeasonLogic::resolve(store, req.season)?;
        let events = store.load_events(&season.id)?;
        let report = Core::analyze(&events, req.window, req.now_ms, req.zone);

        match (req.format, req.view) {
            (ExportFormat::Csv, None) => {
                let body = season_csv(&report.records)?;
                let footer = season_footer(
                    &season.name,
                    report.summary.as_ref(),
                    &exported_at(req),
                );
                Ok(body + &footer)
            }
            (ExportFormat::Csv, Some(view)) => view_csv(view, &report),
            (ExportFormat::Json, None) => to_json(&SeasonExport {
                season: &season,
                summary: report.summary.as_ref(),
                streak: &report.streak,
                records: &report.records,
            }),
            (ExportFormat::Json, Some(view)) => to_json(&match view {
                ViewMode::Streak => ViewExport::Streak(&report.records),
                ViewMode::Hourly => ViewExport::Hourly(&report.hourly),
                ViewMode::Chart => ViewExport::Chart(&report.chart),
            }),
        }
    }

    fn render_store(store: &mut dyn RecordStore, req: &ExportRequest) -> AppResult<String> {
        let mut data = Vec::new();
        for season in store.list_seasons()? {
            let events = store.load_events(&season.id)?;
            data.push((season, events));
        }

        match req.format {
            ExportFormat::Csv => {
                let records = data
                    .iter()
                    .flat_map(|(_, events)| events)
                    .filter(|e| !e.is_sentinel())
                    .count();
                let body = full_csv(&data)?;
                Ok(body + &full_footer(data.len(), records, &exported_at(req)))
            }
            ExportFormat::Json => {
                let mut seasons = Vec::with_capacity(data.len());
                for (season, mut records) in data {
                    records.sort_by_key(|e| e.timestamp);
                    seasons.push(SeasonDump { season, records });
                }
                to_json(&StoreDump {
                    current_season_id: store.current_season_id()?,
                    seasons,
                })
            }
        }
    }

    /// Render and write to `path`, creating parent directories.
    pub fn export(store: &mut dyn RecordStore, req: &ExportRequest, path: &Path) -> AppResult<()> {
        let content = Self::render(store, req)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;

        crate::export::notify_export_success(&req.format.as_str().to_uppercase(), path);
        Ok(())
    }
}

fn exported_at(req: &ExportRequest) -> String {
    req.zone
        .naive_from_millis(req.now_ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::{AddLogic, ScoreChange};
    use crate::db::store::MemoryStore;

    const NOW: i64 = 1_740_900_000_000;

    fn seeded(zone: &Zone) -> MemoryStore {
        let mut store = MemoryStore::new();
        let s = SeasonLogic::create(&mut store, "S1", 1000, NOW).unwrap();
        for (change, time) in [
            (ScoreChange::Win, "2025-03-01 10:00"),
            (ScoreChange::Lose, "2025-03-01 11:00"),
            (ScoreChange::Win, "2025-03-01 12:00"),
        ] {
            AddLogic::apply(&mut store, &s, change, Some(time), zone, NOW).unwrap();
        }
        store
    }

    fn req(zone: &Zone, format: ExportFormat, view: Option<ViewMode>) -> ExportRequest<'_> {
        ExportRequest {
            format,
            season: None,
            view,
            window: 7,
            zone,
            now_ms: NOW,
        }
    }

    #[test]
    fn whole_store_csv_and_json() {
        let zone = Zone::parse("UTC").unwrap();
        let mut store = seeded(&zone);

        let csv = ExportLogic::render(&mut store, &req(&zone, ExportFormat::Csv, None)).unwrap();
        let (body, footer) = csv.split_once("\n\n").unwrap();
        assert_eq!(body.lines().count(), 5);
        assert!(body.lines().nth(1).unwrap().contains("0000-00-00 00:00"));
        assert_eq!(
            footer,
            "统计信息\n导出时间,2025-03-02 07:20:00\n总赛季数,1\n总记录数,3\n"
        );

        let json = ExportLogic::render(&mut store, &req(&zone, ExportFormat::Json, None)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["seasons"][0]["name"], "S1");
        assert_eq!(v["seasons"][0]["records"].as_array().unwrap().len(), 4);
        assert_eq!(v["current_season_id"], v["seasons"][0]["id"]);
    }

    #[test]
    fn view_exports_use_current_season() {
        let zone = Zone::parse("UTC").unwrap();
        let mut store = seeded(&zone);

        let streak =
            ExportLogic::render(&mut store, &req(&zone, ExportFormat::Csv, Some(ViewMode::Streak)))
                .unwrap();
        assert_eq!(
            streak,
            "时间,分数,连胜连败状态\n\
             2025-03-01 10:00,1010,\n\
             2025-03-01 11:00,1000,连败1场\n\
             2025-03-01 12:00,1010,连胜1场\n"
        );

        let chart =
            ExportLogic::render(&mut store, &req(&zone, ExportFormat::Csv, Some(ViewMode::Chart)))
                .unwrap();
        assert_eq!(
            chart,
            "时间,分数\n3/1 10:00,1010\n3/1 11:00,1000\n3/1 12:00,1010\n"
        );

        let hourly =
            ExportLogic::render(&mut store, &req(&zone, ExportFormat::Json, Some(ViewMode::Hourly)))
                .unwrap();
        let v: serde_json::Value = serde_json::from_str(&hourly).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 3);
    }

    #[test]
    fn season_csv_export_ends_with_stats_and_reimports() {
        let zone = Zone::parse("UTC").unwrap();
        let mut store = seeded(&zone);
        let season = SeasonLogic::resolve(&mut store, None).unwrap();

        let mut request = req(&zone, ExportFormat::Csv, None);
        request.season = Some(&season.id);
        let csv = ExportLogic::render(&mut store, &request).unwrap();
        assert!(csv.contains("\n\n统计信息\n赛季名称,S1\n记录数量,3\n最高分数,1010\n最低分数,1000\n"));

        let mut target = MemoryStore::new();
        let other = SeasonLogic::create(&mut target, "T", 1000, NOW).unwrap();
        let summary =
            crate::export::ImportLogic::import_text(&mut target, &csv, None, &zone, NOW).unwrap();
        assert_eq!(summary.events_added, 3);
        assert_eq!(target.load_events(&other.id).unwrap().len(), 4);
    }
}
