use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::import::check_target;
use crate::export::ImportLogic;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use crate::utils::time::now_millis;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, season } = cmd {
        let path = expand_tilde(file);
        let zone = cfg.zone()?;

        let mut pool = DbPool::open(&cfg.database)?;
        check_target(&mut pool, season.as_deref())?;

        let text = fs::read_to_string(&path)?;
        let summary =
            ImportLogic::import_text(&mut pool, &text, season.as_deref(), &zone, now_millis())?;

        success(format!(
            "Imported {} season(s) and {} event(s) from {}",
            summary.seasons_added,
            summary.events_added,
            path.display()
        ));
        if summary.skipped > 0 {
            info(format!("{} row(s) already present were skipped.", summary.skipped));
        }

        ttlog_quiet(
            &pool.conn,
            "import",
            &path.to_string_lossy(),
            &format!(
                "{} seasons, {} events, {} skipped",
                summary.seasons_added, summary.events_added, summary.skipped
            ),
        );
    }
    Ok(())
}
