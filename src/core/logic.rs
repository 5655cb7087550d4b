use crate::core::calculator::suggest::{self, StreakState};
use crate::core::calculator::window::filter_by_window;
use crate::core::calculator::{chart, hourly, streak};
use crate::models::chart_point::ChartSeries;
use crate::models::hourly_bucket::HourlyBucket;
use crate::models::score_event::{ScoreEvent, without_sentinel};
use crate::models::season_summary::SeasonSummary;
use crate::models::streak::AnnotatedEvent;
use crate::utils::time::Zone;
use clap::ValueEnum;
use serde::Serialize;

/// Which derived view of a season to show or export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Streak,
    Hourly,
    Chart,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Streak => "streak",
            ViewMode::Hourly => "hourly",
            ViewMode::Chart => "chart",
        }
    }

    pub fn from_config(s: &str) -> Option<Self> {
        ViewMode::from_str(s, true).ok()
    }
}

/// Everything derived from one season snapshot.
#[derive(Debug, Default, Serialize)]
pub struct SeasonReport {
    /// Newest first, initial event excluded.
    pub records: Vec<AnnotatedEvent>,
    pub hourly: Vec<HourlyBucket>,
    pub chart: ChartSeries,
    pub summary: Option<SeasonSummary>,
    pub streak: StreakState,
}

pub struct Core;

impl Core {
    /// Run the full analysis pipeline over a season's events.
    ///
    /// The initial event is removed first. Streaks and hourly stats use every
    /// event; the chart only the ones inside the selected time window.
    pub fn analyze(
        events: &[ScoreEvent],
        window_selection: usize,
        now_ms: i64,
        zone: &Zone,
    ) -> SeasonReport {
        let mut records = without_sentinel(events);
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let in_window = filter_by_window(&records, window_selection, now_ms);

        SeasonReport {
            records: streak::annotate(&records),
            hourly: hourly::calculate_hourly_stats(&records),
            chart: chart::build_chart_series(&in_window, zone),
            summary: Self::summarize(&records),
            streak: suggest::current_streak(&records),
        }
    }

    pub fn summarize(events: &[ScoreEvent]) -> Option<SeasonSummary> {
        let events = without_sentinel(events);
        let max = events.iter().map(|e| e.score).max()?;
        let min = events.iter().map(|e| e.score).min()?;
        let total: i64 = events.iter().map(|e| e.score).sum();
        let average = (total as f64 / events.len() as f64 * 100.0).round() / 100.0;

        Some(SeasonSummary {
            count: events.len(),
            max,
            min,
            average,
        })
    }

    /// Score a new event starts from: the chronologically latest event, or the
    /// season's initial score when nothing was recorded yet.
    pub fn last_score(events: &[ScoreEvent], initial_score: i64) -> i64 {
        events
            .iter()
            .max_by_key(|e| e.timestamp)
            .map(|e| e.score)
            .unwrap_or(initial_score)
    }
}
