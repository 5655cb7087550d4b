use crate::cli::commands::window_selection;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::window::TimeWindow;
use crate::core::logic::{Core, SeasonReport, ViewMode};
use crate::core::season::SeasonLogic;
use crate::db::pool::DbPool;
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_outcome, colorize};
use crate::utils::formatting::{bold, percent};
use crate::utils::table::{Column, Table};
use crate::utils::time::now_millis;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        season,
        view,
        window,
    } = cmd
    {
        let (window_idx, time_window) = window_selection(*window, cfg)?;
        let view = view.unwrap_or_else(|| cfg.view());
        let zone = cfg.zone()?;

        let mut pool = DbPool::open(&cfg.database)?;
        let season = SeasonLogic::resolve(&mut pool, season.as_deref())?;
        let events = pool.load_events(&season.id)?;

        let report = Core::analyze(&events, window_idx, now_millis(), &zone);

        header(format!("{} ({})", season.name, season.id));
        match &report.summary {
            Some(s) => println!(
                "Records: {}  Max: {}  Min: {}  Avg: {:.2}  Initial: {}\n",
                s.count, s.max, s.min, s.average, season.initial_score
            ),
            None => {
                info("No events recorded in this season yet.");
                return Ok(());
            }
        }

        match view {
            ViewMode::Streak => print_streak(&report, cfg),
            ViewMode::Hourly => print_hourly(&report, cfg),
            ViewMode::Chart => print_chart(&report, time_window, cfg),
        }
    }
    Ok(())
}

fn print_streak(report: &SeasonReport, cfg: &Config) {
    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Time"),
        Column::right("Score"),
        Column::left("Streak"),
    ])
    .with_separator(&cfg.separator_char);

    for r in &report.records {
        table.add_row(vec![
            r.event.id.clone(),
            r.event.time.clone(),
            r.event.score.to_string(),
            r.streak.label.clone(),
        ]);
    }

    // color the streak label after padding
    let rendered = table.render();
    let mut lines = rendered.lines();
    for line in lines.by_ref().take(2) {
        println!("{line}");
    }
    for (line, r) in lines.zip(&report.records) {
        if r.streak.is_empty() {
            println!("{line}");
        } else {
            let color = color_for_outcome(r.streak.kind);
            let cut = line.len() - r.streak.label.len();
            println!("{}{color}{}{RESET}", &line[..cut], &line[cut..]);
        }
    }
}

fn print_hourly(report: &SeasonReport, cfg: &Config) {
    let mut table = Table::new(vec![
        Column::left("时间段"),
        Column::right("总场数"),
        Column::right("胜利场数"),
        Column::right("失败场数"),
        Column::right("胜率"),
        Column::right("败率"),
    ])
    .with_separator(&cfg.separator_char);

    for b in &report.hourly {
        table.add_row(vec![
            b.description(),
            b.total.to_string(),
            b.win_count.to_string(),
            b.lose_count.to_string(),
            percent(b.win_rate),
            percent(b.lose_rate),
        ]);
    }
    print!("{}", table.render());
}

fn print_chart(report: &SeasonReport, window: TimeWindow, cfg: &Config) {
    println!("{}", bold(&window.label()));

    if report.chart.is_empty() {
        info("No events inside the selected time window.");
        return;
    }

    let bound = |v: Option<i64>| colorize(&v.map(|n| n.to_string()).unwrap_or_default(), RESET);
    println!(
        "Y axis: {} .. {}\n",
        bound(report.chart.y_min),
        bound(report.chart.y_max)
    );

    let mut table = Table::new(vec![Column::left("时间"), Column::right("分数")])
        .with_separator(&cfg.separator_char);
    for p in &report.chart.points {
        table.add_row(vec![p.time_label.clone(), p.score.to_string()]);
    }
    print!("{}", table.render());
}
