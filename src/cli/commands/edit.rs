use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::core::season::SeasonLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, score, season } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let season = SeasonLogic::resolve(&mut pool, season.as_deref())?;

        let before = EditLogic::apply(&mut pool, &season.id, id, *score)?;
        success(format!(
            "Event {} ({}) updated: {} → {}",
            before.id, before.time, before.score, score
        ));

        ttlog_quiet(
            &pool.conn,
            "edit",
            &format!("{}/{}", season.id, id),
            &format!("score {} → {}", before.score, score),
        );
    }

    Ok(())
}
