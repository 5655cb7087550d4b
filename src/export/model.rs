// src/export/model.rs

use crate::core::calculator::suggest::StreakState;
use crate::models::chart_point::ChartSeries;
use crate::models::hourly_bucket::HourlyBucket;
use crate::models::score_event::ScoreEvent;
use crate::models::season::Season;
use crate::models::season_summary::SeasonSummary;
use crate::models::streak::AnnotatedEvent;
use serde::Serialize;

/// Whole-store JSON document.
#[derive(Serialize, Debug)]
pub struct StoreDump {
    pub current_season_id: Option<String>,
    pub seasons: Vec<SeasonDump>,
}

/// A season with its raw events, initial event included.
#[derive(Serialize, Debug)]
pub struct SeasonDump {
    #[serde(flatten)]
    pub season: Season,
    pub records: Vec<ScoreEvent>,
}

/// Single-season JSON document: annotated records, newest first.
#[derive(Serialize, Debug)]
pub struct SeasonExport<'a> {
    #[serde(flatten)]
    pub season: &'a Season,
    pub summary: Option<&'a SeasonSummary>,
    pub streak: &'a StreakState,
    pub records: &'a [AnnotatedEvent],
}

/// JSON body of a single view.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum ViewExport<'a> {
    Streak(&'a [AnnotatedEvent]),
    Hourly(&'a [HourlyBucket]),
    Chart(&'a ChartSeries),
}
