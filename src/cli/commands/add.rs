use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, ScoreChange};
use crate::core::season::SeasonLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::colors::{RESET, color_for_delta};
use crate::utils::signed;
use crate::utils::time::now_millis;

/// Record a score event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        season,
        win,
        lose,
        delta,
        score,
        time,
    } = cmd
    {
        //
        // 1. Score change (clap guarantees exactly one)
        //
        let change = match (*win, *lose, *delta, *score) {
            (true, _, _, _) => ScoreChange::Win,
            (_, true, _, _) => ScoreChange::Lose,
            (_, _, Some(d), _) => ScoreChange::Delta(d),
            (_, _, _, Some(s)) => ScoreChange::Absolute(s),
            _ => {
                return Err(AppError::Other(
                    "one of --win, --lose, --delta or --score is required".into(),
                ));
            }
        };

        //
        // 2. Timezone + DB
        //
        let zone = cfg.zone()?;
        let mut pool = DbPool::open(&cfg.database)?;
        let season = SeasonLogic::resolve(&mut pool, season.as_deref())?;

        //
        // 3. Apply
        //
        let out = AddLogic::apply(
            &mut pool,
            &season,
            change,
            time.as_deref(),
            &zone,
            now_millis(),
        )?;

        success(format!(
            "{}: {} → {} ({}{}{}) at {} [id {}]",
            season.name,
            out.previous,
            out.event.score,
            color_for_delta(out.delta),
            signed(out.delta),
            RESET,
            out.event.time,
            out.event.id
        ));

        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("{}/{}", season.id, out.event.id),
            &format!("score {} at {}", out.event.score, out.event.time),
        );
    }

    Ok(())
}
