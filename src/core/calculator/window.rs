//! Trailing time-window selection used before charting.

use crate::models::score_event::ScoreEvent;
use crate::utils::time::DAY_MS;

/// Selectable windows, in picker order. `0` days means "all data".
pub const WINDOW_OPTIONS: [u32; 8] = [1, 3, 7, 15, 30, 60, 100, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    LastDays(u32),
    All,
}

impl TimeWindow {
    pub fn from_index(index: usize) -> Option<Self> {
        WINDOW_OPTIONS.get(index).map(|&days| match days {
            0 => TimeWindow::All,
            d => TimeWindow::LastDays(d),
        })
    }

    pub fn label(&self) -> String {
        match self {
            TimeWindow::LastDays(d) => format!("最近{d}天"),
            TimeWindow::All => "全部数据".to_string(),
        }
    }

    /// Oldest timestamp still inside the window.
    pub fn cutoff(&self, now_ms: i64) -> Option<i64> {
        match self {
            TimeWindow::LastDays(d) => Some(now_ms - i64::from(*d) * DAY_MS),
            TimeWindow::All => None,
        }
    }

    pub fn contains(&self, event: &ScoreEvent, now_ms: i64) -> bool {
        self.cutoff(now_ms)
            .is_none_or(|cutoff| event.timestamp >= cutoff)
    }
}

/// Keep the events inside the selected window. An unknown selection logs a
/// warning and yields no events.
pub fn filter_by_window(events: &[ScoreEvent], selection: usize, now_ms: i64) -> Vec<ScoreEvent> {
    let Some(window) = TimeWindow::from_index(selection) else {
        tracing::warn!(selection, "invalid time window selection");
        return Vec::new();
    };

    events
        .iter()
        .filter(|e| window.contains(e, now_ms))
        .cloned()
        .collect()
}
