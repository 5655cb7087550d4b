use crate::cli::parser::{Commands, SeasonAction};
use crate::config::Config;
use crate::core::season::SeasonLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::{GREEN, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::time::now_millis;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Season { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        SeasonAction::Add { name, initial } => {
            let season = SeasonLogic::create(&mut pool, name, *initial, now_millis())?;
            success(format!(
                "Season '{}' created (id {}, initial score {}).",
                season.name, season.id, season.initial_score
            ));
            if pool.current_season_id()?.as_deref() == Some(season.id.as_str()) {
                info("This is now the current season.");
            }
            ttlog_quiet(
                &pool.conn,
                "season_add",
                &season.id,
                &format!("Created season '{}'", season.name),
            );
        }

        SeasonAction::List => {
            let seasons = SeasonLogic::list(&mut pool)?;
            if seasons.is_empty() {
                info("No seasons yet. Create one with `season add <NAME>`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left(""),
                Column::left("ID"),
                Column::left("Name"),
                Column::right("Initial"),
                Column::right("Records"),
                Column::left("Created"),
            ])
            .with_separator(&cfg.separator_char);

            for ov in seasons {
                table.add_row(vec![
                    if ov.is_current { "*".into() } else { String::new() },
                    ov.season.id,
                    ov.season.name,
                    ov.season.initial_score.to_string(),
                    ov.record_count.to_string(),
                    ov.season.create_time,
                ]);
            }
            print!("{}", table.render());
        }

        SeasonAction::Use { id } => {
            let season = SeasonLogic::select(&mut pool, id)?;
            success(format!(
                "Current season: {GREEN}{}{RESET} ({})",
                season.name, season.id
            ));
            ttlog_quiet(&pool.conn, "season_use", &season.id, "Selected as current season");
        }

        SeasonAction::Rename { id, name } => {
            let season = SeasonLogic::rename(&mut pool, id, name)?;
            success(format!("Season {} renamed to '{}'.", season.id, season.name));
            ttlog_quiet(
                &pool.conn,
                "season_rename",
                &season.id,
                &format!("Renamed to '{}'", season.name),
            );
        }

        SeasonAction::Del { id } => {
            let season = pool
                .find_season(id)?
                .ok_or_else(|| AppError::SeasonNotFound(id.clone()))?;

            let prompt = format!(
                "Delete season '{}' ({}) and ALL its events? This action is irreversible.",
                season.name, season.id
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let current = SeasonLogic::delete(&mut pool, id)?;
            success(format!("Season '{}' has been deleted.", season.name));
            match current {
                Some(c) => info(format!("Current season: {c}")),
                None => info("No current season."),
            }
            ttlog_quiet(
                &pool.conn,
                "season_del",
                &season.id,
                &format!("Deleted season '{}'", season.name),
            );
        }
    }

    Ok(())
}
