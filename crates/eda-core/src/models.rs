use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::time_utils::est_hour;

// ── NewsRecord ────────────────────────────────────────────────────────────────

/// One news headline with the calendar fields derived at load time.
///
/// `sentiment` and `domain` start out empty and are filled in place by the
/// correlation and publisher analyses respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub publisher: String,
    pub headline: String,
    /// Publication instant, normalised to UTC.
    pub timestamp: DateTime<Utc>,
    /// Headline length in characters.
    pub headline_len: usize,
    /// Calendar date of the UTC instant.
    pub date_only: NaiveDate,
    /// Hour of day in UTC (0-23).
    pub hour_utc: u32,
    /// Hour of day shifted to EST as a fixed UTC-4 offset (0-23).
    pub hour_est: u32,
    pub weekday: Weekday,
    /// Polarity score in [-1, 1], set by sentiment scoring.
    pub sentiment: Option<f64>,
    /// Publisher domain, set by domain extraction.
    pub domain: Option<String>,
}

impl NewsRecord {
    /// Build a record from the raw CSV fields, deriving all calendar columns.
    pub fn new(publisher: impl Into<String>, headline: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let publisher = publisher.into();
        let headline = headline.into();
        let hour_utc = timestamp.hour();
        Self {
            headline_len: headline.chars().count(),
            date_only: timestamp.date_naive(),
            hour_utc,
            hour_est: est_hour(hour_utc),
            weekday: timestamp.weekday(),
            publisher,
            headline,
            timestamp,
            sentiment: None,
            domain: None,
        }
    }
}

// ── PriceBar ──────────────────────────────────────────────────────────────────

/// One OHLCV bar for a single ticker and trading day, unique by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

// ── DailyAggregate ────────────────────────────────────────────────────────────

/// One date present in both the news and price series, after alignment.
///
/// `daily_return` is `None` for the first bar of the price series (no prior
/// close). Rows whose lagged return would be undefined (the final price
/// date) are never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Mean headline polarity for the date.
    pub avg_sentiment: f64,
    /// Number of headlines published on the date.
    pub news_volume: usize,
    /// Same-day simple return, `close_d / close_{d-1} - 1`.
    pub daily_return: Option<f64>,
    /// Next-day simple return, `close_{d+1} / close_d - 1`.
    pub lagged_return: f64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
