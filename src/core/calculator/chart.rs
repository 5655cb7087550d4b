//! Chart series: (label, score) points in chronological order.

use crate::models::chart_point::{ChartPoint, ChartSeries};
use crate::models::score_event::ScoreEvent;
use crate::utils::time::Zone;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// "M/D H:MM": month, day and hour unpadded, minutes zero-padded.
pub fn chart_label(dt: &NaiveDateTime) -> String {
    format!(
        "{}/{} {}:{:02}",
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute()
    )
}

/// One point per event, sorted by timestamp ascending.
pub fn build_chart_points(events: &[ScoreEvent], zone: &Zone) -> Vec<ChartPoint> {
    let mut sorted: Vec<&ScoreEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    sorted
        .into_iter()
        .map(|e| {
            let time_label = zone
                .naive_from_millis(e.timestamp)
                .map(|dt| chart_label(&dt))
                .unwrap_or_else(|| e.time.clone());

            ChartPoint {
                time_label,
                score: e.score,
                timestamp: e.timestamp,
            }
        })
        .collect()
}

/// Points plus y-axis bounds padded by 10% of the score range (never below 0).
pub fn build_chart_series(events: &[ScoreEvent], zone: &Zone) -> ChartSeries {
    let points = build_chart_points(events, zone);

    let (Some(min), Some(max)) = (
        points.iter().map(|p| p.score).min(),
        points.iter().map(|p| p.score).max(),
    ) else {
        return ChartSeries::default();
    };

    let padding = (max - min) as f64 * 0.1;
    let y_min = ((min as f64 - padding).floor() as i64).max(0);
    let y_max = (max as f64 + padding).ceil() as i64;

    ChartSeries {
        points,
        y_min: Some(y_min),
        y_max: Some(y_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::resolve_event_time;

    fn shanghai() -> Zone {
        Zone::parse("Asia/Shanghai").unwrap()
    }

    fn ev(id: &str, score: i64, time: &str) -> ScoreEvent {
        let (time, ts) = resolve_event_time(time, &shanghai()).unwrap();
        ScoreEvent::new(id.into(), score, time, ts)
    }

    #[test]
    fn empty_input_gives_empty_series() {
        assert!(build_chart_points(&[], &shanghai()).is_empty());
        let series = build_chart_series(&[], &shanghai());
        assert!(series.is_empty());
        assert_eq!((series.y_min, series.y_max), (None, None));
    }

    #[test]
    fn labels_are_unpadded_except_minutes() {
        let points = build_chart_points(&[ev("a", 1000, "2025-03-07 09:05")], &shanghai());
        assert_eq!(points[0].time_label, "3/7 9:05");
        let points = build_chart_points(&[ev("b", 1000, "2025-11-23 21:40")], &shanghai());
        assert_eq!(points[0].time_label, "11/23 21:40");
    }

    #[test]
    fn points_are_sorted_and_one_per_event() {
        let events = vec![
            ev("c", 1030, "2025-03-07 12:00"),
            ev("a", 1010, "2025-03-07 10:00"),
            ev("b", 1000, "2025-03-07 11:00"),
        ];
        let points = build_chart_points(&events, &shanghai());
        assert_eq!(points.len(), events.len());
        let scores: Vec<i64> = points.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![1010, 1000, 1030]);
        assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn axis_bounds_pad_the_range() {
        let events = vec![
            ev("a", 1000, "2025-03-07 10:00"),
            ev("b", 1100, "2025-03-07 11:00"),
        ];
        let series = build_chart_series(&events, &shanghai());
        assert_eq!(series.y_min, Some(990));
        assert_eq!(series.y_max, Some(1110));
    }

    #[test]
    fn lower_axis_bound_never_goes_negative() {
        let events = vec![
            ev("a", 0, "2025-03-07 10:00"),
            ev("b", 50, "2025-03-07 11:00"),
        ];
        let series = build_chart_series(&events, &shanghai());
        assert_eq!(series.y_min, Some(0));
        assert_eq!(series.y_max, Some(55));
    }
}
