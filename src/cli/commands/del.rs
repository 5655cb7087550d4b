use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::season::SeasonLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, season } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let season = SeasonLogic::resolve(&mut pool, season.as_deref())?;

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete event {} from season '{}'? This action is irreversible.",
            id, season.name
        );
        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let removed = DeleteLogic::apply(&mut pool, &season.id, id)?;
        success(format!(
            "Event {} ({}, score {}) has been deleted.",
            removed.id, removed.time, removed.score
        ));

        ttlog_quiet(
            &pool.conn,
            "del",
            &format!("{}/{}", season.id, removed.id),
            &format!("Deleted event at {}", removed.time),
        );
    }

    Ok(())
}
