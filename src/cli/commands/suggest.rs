use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::suggest::{Action, QUICK_DELTAS, current_streak, suggest_delta};
use crate::core::logic::Core;
use crate::core::season::SeasonLogic;
use crate::db::pool::DbPool;
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::models::score_event::clamp_score;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, RED, RESET};
use crate::utils::signed;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Suggest { season } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let season = SeasonLogic::resolve(&mut pool, season.as_deref())?;
        let events = pool.load_events(&season.id)?;

        let state = current_streak(&events);
        let last = Core::last_score(&events, season.initial_score);
        let win = suggest_delta(Action::Win, &state);
        let lose = suggest_delta(Action::Lose, &state);

        header(&season.name);
        println!("Current score : {last}");
        println!("Win streak    : {}", state.win_streak);
        println!(
            "Last outcome  : {}",
            state.last_outcome.map(|o| o.as_str()).unwrap_or("-")
        );
        println!(
            "Next win      : {GREEN}{}{RESET} → {}",
            signed(win),
            clamp_score(last + win)
        );
        println!(
            "Next loss     : {RED}{}{RESET} → {}",
            signed(lose),
            clamp_score(last + lose)
        );
        let quick: Vec<String> = QUICK_DELTAS.iter().map(|d| signed(*d)).collect();
        println!("Quick deltas  : {} (add --delta N)", quick.join(" "));
    }

    Ok(())
}
