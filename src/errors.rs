//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid score: {0} (must be between 0 and 10000)")]
    InvalidScore(i64),

    #[error("Invalid time format: '{0}' (expected YYYY-MM-DD HH:MM)")]
    InvalidTime(String),

    #[error("Invalid time window selection: {0}")]
    InvalidWindow(usize),

    #[error("An event already exists at {0}; choose a different time")]
    TimeCollision(String),

    #[error(
        "{time} is earlier than the latest event ({latest}); use --score to record a past result"
    )]
    BackdatedChange { time: String, latest: String },

    #[error("Invalid season name: {0}")]
    InvalidSeasonName(String),

    // ---------------------------
    // Missing entities
    // ---------------------------
    #[error("Season not found: {0}")]
    SeasonNotFound(String),

    #[error("No current season: create one with `season add <NAME>`")]
    NoCurrentSeason,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("The initial event of a season cannot be modified")]
    SentinelEvent,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Import error at line {line}: {reason}")]
    Import { line: usize, reason: String },

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
