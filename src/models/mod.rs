pub mod chart_point;
pub mod hourly_bucket;
pub mod outcome;
pub mod score_event;
pub mod season;
pub mod season_summary;
pub mod streak;
