pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod season;
pub mod suggest;

use crate::config::Config;
use crate::core::calculator::window::TimeWindow;
use crate::errors::{AppError, AppResult};

/// Window index from `--window`, or the configured default. Unknown
/// indexes are rejected here so the analytics never see them.
pub(crate) fn window_selection(arg: Option<usize>, cfg: &Config) -> AppResult<(usize, TimeWindow)> {
    let idx = arg.unwrap_or(cfg.default_window);
    let window = TimeWindow::from_index(idx).ok_or(AppError::InvalidWindow(idx))?;
    Ok((idx, window))
}
