//! Publication-pattern analysis: daily volume (with rolling-mean
//! smoothing and spike detection), hourly and weekday distributions, and
//! volume on configured market-event days.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use eda_core::config::EventCalendar;
use eda_core::models::NewsRecord;
use eda_core::stats;
use eda_core::time_utils::WEEKDAY_ORDER;

// ── Daily volume ──────────────────────────────────────────────────────────────

/// Article counts per calendar date, sorted ascending. Dates without news
/// are absent, never zero-filled.
pub fn daily_counts(records: &[NewsRecord]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.date_only).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// The `n` highest-volume days, descending by count (ties by date).
pub fn top_spike_days(daily: &[(NaiveDate, usize)], n: usize) -> Vec<(NaiveDate, usize)> {
    let mut ranked: Vec<(NaiveDate, usize)> = daily.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

// ── Hour / weekday patterns ───────────────────────────────────────────────────

/// Article counts per EST-shifted hour of day.
pub fn hourly_pattern(records: &[NewsRecord]) -> [usize; 24] {
    let mut counts = [0usize; 24];
    for record in records {
        counts[record.hour_est as usize % 24] += 1;
    }
    counts
}

/// Article counts in Monday..Sunday order.
pub fn weekday_counts(records: &[NewsRecord]) -> [(Weekday, usize); 7] {
    let mut out = WEEKDAY_ORDER.map(|w| (w, 0usize));
    for record in records {
        let idx = record.weekday.num_days_from_monday() as usize;
        out[idx].1 += 1;
    }
    out
}

/// Share of articles published on Saturday or Sunday, in [0, 1].
/// Zero for an empty table.
pub fn weekend_share(records: &[NewsRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let weekend = records
        .iter()
        .filter(|r| matches!(r.weekday, Weekday::Sat | Weekday::Sun))
        .count();
    weekend as f64 / records.len() as f64
}

// ── Market events ─────────────────────────────────────────────────────────────

/// News volume on one configured market-event day.
#[derive(Debug, Clone, PartialEq)]
pub struct EventVolume {
    pub date: NaiveDate,
    pub label: String,
    pub volume: usize,
    /// Whether the volume exceeds the mean + 2 std spike threshold.
    pub high_impact: bool,
}

/// Volume on each event day in `calendar`, flagged against the
/// `mean + 2·std` threshold of the daily series.
pub fn event_day_volumes(records: &[NewsRecord], calendar: &EventCalendar) -> Vec<EventVolume> {
    let daily = daily_counts(records);
    let counts: Vec<f64> = daily.iter().map(|(_, c)| *c as f64).collect();

    let mean = stats::mean(&counts).unwrap_or(0.0);
    let std = stats::std_sample(&counts).unwrap_or(0.0);
    let threshold = mean + 2.0 * std;

    let by_date: BTreeMap<NaiveDate, usize> = daily.into_iter().collect();

    calendar
        .iter()
        .map(|(date, label)| {
            let volume = by_date.get(date).copied().unwrap_or(0);
            EventVolume {
                date: *date,
                label: label.to_string(),
                volume,
                high_impact: counts.len() >= 2 && volume as f64 > threshold,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
