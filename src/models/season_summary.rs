use serde::Serialize;

/// Basic score statistics of a season (initial event excluded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub count: usize,
    pub max: i64,
    pub min: i64,
    pub average: f64,
}
