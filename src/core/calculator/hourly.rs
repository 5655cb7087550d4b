//! Hour-of-week aggregation: win/lose counts per (weekday|weekend, hour).

use crate::core::calculator::streak::chronological_order;
use crate::models::hourly_bucket::{DayClass, HourlyBucket};
use crate::models::outcome::Outcome;
use crate::models::score_event::ScoreEvent;
use crate::utils::time::parse_event_time;
use chrono::{Datelike, Timelike, Weekday};
use std::collections::BTreeMap;

fn day_class(weekday: Weekday) -> DayClass {
    match weekday {
        Weekday::Sat | Weekday::Sun => DayClass::Weekend,
        _ => DayClass::Weekday,
    }
}

fn rate(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}

/// Build one bucket per observed (day class, hour).
///
/// Day and hour come from the event's display `time`. The outcome of each
/// event is its comparison with the chronologically preceding event; the
/// first event of the season only counts towards `total`.
pub fn calculate_hourly_stats(events: &[ScoreEvent]) -> Vec<HourlyBucket> {
    let order = chronological_order(events);

    // outcome of each input index against its chronological predecessor
    let mut outcomes: Vec<Option<Outcome>> = vec![None; events.len()];
    for pair in order.windows(2) {
        let (prev, curr) = (&events[pair[0]], &events[pair[1]]);
        outcomes[pair[1]] = Outcome::between(prev.score, curr.score);
    }

    let mut buckets: BTreeMap<(DayClass, u32), HourlyBucket> = BTreeMap::new();

    for (idx, ev) in events.iter().enumerate() {
        let Some(dt) = parse_event_time(&ev.time) else {
            tracing::warn!(event = %ev.id, time = %ev.time, "skipping event with unparsable time");
            continue;
        };

        let class = day_class(dt.weekday());
        let hour = dt.hour();

        let bucket = buckets
            .entry((class, hour))
            .or_insert_with(|| HourlyBucket::new(class, hour));

        bucket.total += 1;
        match outcomes[idx] {
            Some(Outcome::Win) => bucket.win_count += 1,
            Some(Outcome::Lose) => bucket.lose_count += 1,
            None => {}
        }
    }

    // BTreeMap order = Weekday before Weekend, then hour ascending
    buckets
        .into_values()
        .map(|mut b| {
            b.win_rate = rate(b.win_count, b.total);
            b.lose_rate = rate(b.lose_count, b.total);
            b
        })
        .collect()
}
