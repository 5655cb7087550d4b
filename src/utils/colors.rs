use crate::models::outcome::Outcome;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Win → green, Lose → red, no outcome → reset
pub fn color_for_outcome(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Win) => GREEN,
        Some(Outcome::Lose) => RED,
        None => RESET,
    }
}

/// Delta color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_delta(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

/// Ritorna il valore colorato, grigio se vuoto.
pub fn colorize(value: &str, color: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
