//! CSV codec for seasons and score events.
//!
//! Values are written unquoted and split on bare commas when read back, so a
//! season name containing a comma does not survive a round trip.

use crate::core::calculator::streak::chronological_order;
use crate::core::logic::{SeasonReport, ViewMode};
use crate::errors::{AppError, AppResult};
use crate::models::chart_point::ChartSeries;
use crate::models::hourly_bucket::HourlyBucket;
use crate::models::score_event::{SENTINEL_TIME, ScoreEvent, is_valid_score};
use crate::models::season::Season;
use crate::models::season_summary::SeasonSummary;
use crate::models::streak::AnnotatedEvent;
use crate::utils::time::{Zone, resolve_event_time};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};

pub const FULL_HEADER: [&str; 6] = ["赛季ID", "赛季名称", "初始分数", "记录ID", "分数", "时间"];
pub const SEASON_HEADER: [&str; 3] = ["时间", "分数", "连胜连败状态"];
pub const HOURLY_HEADER: [&str; 6] = ["时间段", "总场数", "胜利场数", "失败场数", "胜率", "败率"];
pub const CHART_HEADER: [&str; 2] = ["时间", "分数"];

/// First field of the stats block that closes full and single-season exports.
/// Reading stops there.
pub const FOOTER_MARKER: &str = "统计信息";

/// Layout of a CSV file, told apart by its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvKind {
    /// Every season with every event.
    Full,
    /// One season: time, score, streak label.
    Season,
}

/// One data row of a full export.
#[derive(Debug, Clone, PartialEq)]
pub struct FullRow {
    pub line: usize,
    pub season_id: String,
    pub season_name: String,
    pub initial_score: i64,
    /// `None` for rows that only carry the season columns.
    pub event: Option<ScoreEvent>,
}

/// One data row of a single-season export.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow {
    pub line: usize,
    pub time: String,
    pub timestamp: i64,
    pub score: i64,
}

// ---------------------------
// Writing
// ---------------------------

fn write_rows<I, R>(header: &[&str], rows: I) -> AppResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Full export: every event of every season, initial events included.
pub fn full_csv(data: &[(Season, Vec<ScoreEvent>)]) -> AppResult<String> {
    let rows = data.iter().flat_map(|(season, events)| {
        chronological_order(events).into_iter().map(move |i| {
            let ev = &events[i];
            vec![
                season.id.clone(),
                season.name.clone(),
                season.initial_score.to_string(),
                ev.id.clone(),
                ev.score.to_string(),
                ev.time.clone(),
            ]
        })
    });

    write_rows(&FULL_HEADER, rows)
}

/// Single-season export, oldest first, initial event excluded.
pub fn season_csv(records: &[AnnotatedEvent]) -> AppResult<String> {
    let mut rows: Vec<&AnnotatedEvent> = records.iter().filter(|r| !r.event.is_sentinel()).collect();
    rows.sort_by_key(|r| r.event.timestamp);

    write_rows(
        &SEASON_HEADER,
        rows.into_iter().map(|r| {
            vec![
                r.event.time.clone(),
                r.event.score.to_string(),
                r.streak.label.clone(),
            ]
        }),
    )
}

pub fn hourly_csv(buckets: &[HourlyBucket]) -> AppResult<String> {
    write_rows(
        &HOURLY_HEADER,
        buckets.iter().map(|b| {
            vec![
                b.description(),
                b.total.to_string(),
                b.win_count.to_string(),
                b.lose_count.to_string(),
                format!("{}%", b.win_rate),
                format!("{}%", b.lose_rate),
            ]
        }),
    )
}

pub fn chart_csv(series: &ChartSeries) -> AppResult<String> {
    write_rows(
        &CHART_HEADER,
        series
            .points
            .iter()
            .map(|p| vec![p.time_label.clone(), p.score.to_string()]),
    )
}

/// Stats block closing a full export.
pub fn full_footer(seasons: usize, records: usize, exported_at: &str) -> String {
    format!("\n{FOOTER_MARKER}\n导出时间,{exported_at}\n总赛季数,{seasons}\n总记录数,{records}\n")
}

/// Stats block closing a single-season export.
pub fn season_footer(name: &str, summary: Option<&SeasonSummary>, exported_at: &str) -> String {
    let (count, max, min, avg) = match summary {
        Some(s) => (
            s.count.to_string(),
            s.max.to_string(),
            s.min.to_string(),
            s.average.to_string(),
        ),
        None => ("0".into(), "-".into(), "-".into(), "-".into()),
    };
    format!(
        "\n{FOOTER_MARKER}\n赛季名称,{name}\n记录数量,{count}\n最高分数,{max}\n最低分数,{min}\n平均分数,{avg}\n导出时间,{exported_at}\n"
    )
}

/// CSV of the selected view of an analyzed season.
pub fn view_csv(view: ViewMode, report: &SeasonReport) -> AppResult<String> {
    match view {
        ViewMode::Streak => season_csv(&report.records),
        ViewMode::Hourly => hourly_csv(&report.hourly),
        ViewMode::Chart => chart_csv(&report.chart),
    }
}

// ---------------------------
// Reading
// ---------------------------

fn records(text: &str) -> AppResult<Vec<(usize, StringRecord)>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        // record positions point before any blank lines the reader skipped
        let line = rec
            .position()
            .map(|p| line_at(text, p.byte() as usize))
            .unwrap_or(0);
        if rec.get(0) == Some(FOOTER_MARKER) {
            break;
        }
        if rec.iter().all(str::is_empty) {
            continue;
        }
        out.push((line, rec));
    }
    Ok(out)
}

/// 1-based line number of the record that starts at or after `byte`, past
/// any blank lines.
fn line_at(text: &str, byte: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = byte.min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

pub fn detect_kind(text: &str) -> AppResult<CsvKind> {
    let rows = records(text)?;
    let Some((line, header)) = rows.first() else {
        return Err(AppError::Import {
            line: 1,
            reason: "file is empty".to_string(),
        });
    };

    match header.get(0) {
        Some(first) if first == FULL_HEADER[0] => Ok(CsvKind::Full),
        Some(first) if first == SEASON_HEADER[0] => Ok(CsvKind::Season),
        _ => Err(AppError::Import {
            line: *line,
            reason: "unrecognized header".to_string(),
        }),
    }
}

fn field<'a>(rec: &'a StringRecord, idx: usize) -> &'a str {
    rec.get(idx).unwrap_or("")
}

fn parse_score(raw: &str, line: usize) -> AppResult<i64> {
    let score: i64 = raw.parse().map_err(|_| AppError::Import {
        line,
        reason: format!("invalid score '{raw}'"),
    })?;
    if !is_valid_score(score) {
        return Err(AppError::Import {
            line,
            reason: format!("score {score} outside 0..=10000"),
        });
    }
    Ok(score)
}

fn parse_time(raw: &str, zone: &Zone, line: usize) -> AppResult<(String, i64)> {
    if raw == SENTINEL_TIME {
        return Ok((SENTINEL_TIME.to_string(), 0));
    }
    resolve_event_time(raw, zone).map_err(|_| AppError::Import {
        line,
        reason: format!("invalid time '{raw}'"),
    })
}

/// Parse a full export. Any malformed row fails the whole parse.
pub fn parse_full(text: &str, zone: &Zone) -> AppResult<Vec<FullRow>> {
    let mut out = Vec::new();

    for (line, rec) in records(text)?.into_iter().skip(1) {
        let season_id = field(&rec, 0);
        if season_id.is_empty() {
            return Err(AppError::Import {
                line,
                reason: "missing season id".to_string(),
            });
        }

        let initial_raw = field(&rec, 2);
        let initial_score = if initial_raw.is_empty() {
            0
        } else {
            parse_score(initial_raw, line)?
        };

        let (record_id, score, time) = (field(&rec, 3), field(&rec, 4), field(&rec, 5));
        let event = if record_id.is_empty() && score.is_empty() && time.is_empty() {
            None
        } else {
            if record_id.is_empty() {
                return Err(AppError::Import {
                    line,
                    reason: "missing record id".to_string(),
                });
            }
            let score = parse_score(score, line)?;
            let (time, timestamp) = parse_time(time, zone, line)?;
            Some(ScoreEvent::new(record_id.to_string(), score, time, timestamp))
        };

        out.push(FullRow {
            line,
            season_id: season_id.to_string(),
            season_name: field(&rec, 1).to_string(),
            initial_score,
            event,
        });
    }

    Ok(out)
}

/// Parse a single-season export. The streak column is ignored.
pub fn parse_season(text: &str, zone: &Zone) -> AppResult<Vec<SeasonRow>> {
    let mut out = Vec::new();

    for (line, rec) in records(text)?.into_iter().skip(1) {
        let (time, timestamp) = parse_time(field(&rec, 0), zone, line)?;
        if timestamp == 0 {
            return Err(AppError::Import {
                line,
                reason: "initial event rows are not allowed here".to_string(),
            });
        }
        let score = parse_score(field(&rec, 1), line)?;
        out.push(SeasonRow {
            line,
            time,
            timestamp,
            score,
        });
    }

    Ok(out)
}
