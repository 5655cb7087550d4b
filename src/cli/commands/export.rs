use crate::cli::commands::window_selection;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};
use crate::ui::messages::info;
use crate::ui::prompt::ask_confirmation;
use crate::utils::path::expand_tilde;
use crate::utils::time::now_millis;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        season,
        view,
        window,
        force,
    } = cmd
    {
        let path = expand_tilde(file);
        let (window_idx, _) = window_selection(*window, cfg)?;
        let zone = cfg.zone()?;

        if path.exists()
            && !*force
            && !ask_confirmation(&format!(
                "The file '{}' already exists. Overwrite it?",
                path.display()
            ))
        {
            info("Export cancelled: existing file not overwritten.");
            return Ok(());
        }

        let mut pool = DbPool::open(&cfg.database)?;
        let req = ExportRequest {
            format: *format,
            season: season.as_deref(),
            view: *view,
            window: window_idx,
            zone: &zone,
            now_ms: now_millis(),
        };
        ExportLogic::export(&mut pool, &req, &path)?;

        let what = match (season, view) {
            (_, Some(v)) => format!("{} view", v.as_str()),
            (Some(s), None) => format!("season {s}"),
            (None, None) => "all seasons".to_string(),
        };
        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {what} as {}", format.as_str()),
        );
    }
    Ok(())
}
