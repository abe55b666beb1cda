//! Sentiment-vs-return correlation study: VADER polarity scoring, date
//! alignment of news sentiment against price returns and the Pearson
//! correlations over the aligned table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eda_core::error::{EdaError, Result};
use eda_core::models::{DailyAggregate, NewsRecord, PriceBar};
use eda_core::stats;
use tracing::{debug, info};
use vader_sentiment::SentimentIntensityAnalyzer;

// ── Sentiment scoring ─────────────────────────────────────────────────────────

/// VADER polarity scorer for headlines. Compound scores land in [-1, 1];
/// empty text scores 0.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity of a single text.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0).clamp(-1.0, 1.0)
    }

    /// Attach a sentiment score to every unscored record. Records that
    /// already carry a score are left untouched, so re-running is a no-op.
    pub fn score_records(&self, records: &mut [NewsRecord]) {
        let mut scored = 0usize;
        for record in records.iter_mut() {
            if record.sentiment.is_none() {
                record.sentiment = Some(self.score(&record.headline));
                scored += 1;
            }
        }
        debug!("Scored sentiment for {scored} records");
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Alignment ─────────────────────────────────────────────────────────────────

/// Join daily news sentiment with daily price returns.
///
/// Sentiment is averaged per calendar date. Returns are simple returns
/// `close_d / close_{d-1} - 1`; the lagged return on date `d` is the
/// return realised from `close_d` to `close_{d+1}`. The join is inner:
/// dates without news are absent, and rows whose lagged return is
/// undefined (the final price date) are dropped.
pub fn align_and_aggregate(
    news: &[NewsRecord],
    prices: &[PriceBar],
) -> Result<Vec<DailyAggregate>> {
    // Per-date sentiment mean and article count.
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in news {
        let sentiment = record.sentiment.ok_or(EdaError::SentimentMissing)?;
        let entry = sums.entry(record.date_only).or_insert((0.0, 0));
        entry.0 += sentiment;
        entry.1 += 1;
    }

    // Per-date same-day and lagged simple returns, keyed by bar date.
    let mut returns: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for (i, bar) in prices.iter().enumerate() {
        let daily = if i > 0 {
            Some(bar.close / prices[i - 1].close - 1.0)
        } else {
            None
        };
        let lagged = prices
            .get(i + 1)
            .map(|next| next.close / bar.close - 1.0);
        returns.insert(bar.date, (daily, lagged));
    }

    let aggregates: Vec<DailyAggregate> = sums
        .into_iter()
        .filter_map(|(date, (sum, count))| {
            let (daily_return, lagged) = returns.get(&date)?;
            let lagged_return = (*lagged)?;
            Some(DailyAggregate {
                date,
                avg_sentiment: sum / count as f64,
                news_volume: count,
                daily_return: *daily_return,
                lagged_return,
            })
        })
        .collect();

    info!("Aligned {} news/price dates", aggregates.len());
    Ok(aggregates)
}

// ── Correlation ───────────────────────────────────────────────────────────────

/// Pearson correlations between daily average sentiment and returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSummary {
    /// Sentiment vs the return realised on the same date.
    pub same_day: f64,
    /// Sentiment vs the next day's return.
    pub lagged: f64,
    pub aligned_days: usize,
}

/// Correlate average sentiment against same-day and lagged returns.
/// Needs at least 2 aligned rows; degenerate (zero-variance) input
/// yields `NaN` coefficients rather than an error.
pub fn correlate(aggregates: &[DailyAggregate]) -> Result<CorrelationSummary> {
    if aggregates.len() < 2 {
        return Err(EdaError::InsufficientData {
            needed: 2,
            got: aggregates.len(),
        });
    }

    let sentiment: Vec<f64> = aggregates.iter().map(|a| a.avg_sentiment).collect();
    let lagged: Vec<f64> = aggregates.iter().map(|a| a.lagged_return).collect();
    let lagged_r = stats::pearson(&sentiment, &lagged);

    // Same-day pairs exclude rows where the return is undefined (first bar).
    let (same_x, same_y): (Vec<f64>, Vec<f64>) = aggregates
        .iter()
        .filter_map(|a| a.daily_return.map(|r| (a.avg_sentiment, r)))
        .unzip();
    let same_day_r = stats::pearson(&same_x, &same_y);

    Ok(CorrelationSummary {
        same_day: same_day_r,
        lagged: lagged_r,
        aligned_days: aggregates.len(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_record(headline: &str, y: i32, m: u32, d: u32) -> NewsRecord {
        let ts = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        NewsRecord::new("pub", headline, ts)
    }

    fn make_bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    // ── SentimentScorer ───────────────────────────────────────────────────────

    #[test]
    fn test_score_positive_and_negative_headlines() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score("Stock soars on great earnings, best quarter ever") > 0.0);
        assert!(scorer.score("Shares collapse after terrible loss and fraud charges") < 0.0);
    }

    #[test]
    fn test_score_empty_text_is_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   "), 0.0);
    }

    #[test]
    fn test_score_within_bounds() {
        let scorer = SentimentScorer::new();
        for text in [
            "amazing wonderful fantastic great excellent best",
            "horrible terrible awful worst disaster catastrophe",
            "the company reported quarterly results",
        ] {
            let s = scorer.score(text);
            assert!((-1.0..=1.0).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn test_score_records_is_idempotent() {
        let scorer = SentimentScorer::new();
        let mut records = vec![make_record("great news", 2020, 3, 23)];
        records[0].sentiment = Some(0.123);

        scorer.score_records(&mut records);
        assert_eq!(records[0].sentiment, Some(0.123));
    }

    // ── align_and_aggregate ───────────────────────────────────────────────────

    fn scored(headline: &str, score: f64, y: i32, m: u32, d: u32) -> NewsRecord {
        let mut r = make_record(headline, y, m, d);
        r.sentiment = Some(score);
        r
    }

    #[test]
    fn test_align_rejects_unscored_records() {
        let news = vec![make_record("h", 2020, 3, 23)];
        let prices = vec![make_bar(2020, 3, 23, 100.0)];
        let err = align_and_aggregate(&news, &prices).unwrap_err();
        assert!(matches!(err, EdaError::SentimentMissing));
    }

    #[test]
    fn test_align_worked_example() {
        // Closes 100 -> 105 -> 95, news on the middle date: that date's
        // same-day return is the 100 -> 105 move, its lagged return the
        // 105 -> 95 move realised the day after.
        let news = vec![scored("h", 0.2, 2020, 3, 23)];
        let prices = vec![
            make_bar(2020, 3, 22, 100.0),
            make_bar(2020, 3, 23, 105.0),
            make_bar(2020, 3, 24, 95.0),
        ];

        let aggregates = align_and_aggregate(&news, &prices).unwrap();
        assert_eq!(aggregates.len(), 1);
        let row = &aggregates[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
        assert!((row.avg_sentiment - 0.2).abs() < 1e-12);
        assert_eq!(row.news_volume, 1);
        assert!((row.lagged_return - (-0.0952380952)).abs() < 1e-6);
        assert!((row.daily_return.unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_align_first_bar_has_no_daily_return() {
        let news = vec![scored("h", 0.2, 2020, 3, 23)];
        let prices = vec![make_bar(2020, 3, 23, 100.0), make_bar(2020, 3, 24, 105.0)];
        let aggregates = align_and_aggregate(&news, &prices).unwrap();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].daily_return, None);
        assert!((aggregates[0].lagged_return - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_align_drops_final_price_date() {
        // The last bar has no next close, so its row cannot appear.
        let news = vec![scored("h", 0.1, 2020, 3, 25)];
        let prices = vec![
            make_bar(2020, 3, 23, 100.0),
            make_bar(2020, 3, 24, 105.0),
            make_bar(2020, 3, 25, 95.0),
        ];
        let aggregates = align_and_aggregate(&news, &prices).unwrap();
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_align_is_inner_join() {
        // News on a non-trading date does not survive the join.
        let news = vec![
            scored("h", 0.1, 2020, 3, 23),
            scored("h", 0.3, 2020, 3, 28),
        ];
        let prices = vec![make_bar(2020, 3, 23, 100.0), make_bar(2020, 3, 24, 101.0)];
        let aggregates = align_and_aggregate(&news, &prices).unwrap();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].date, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
    }

    #[test]
    fn test_align_averages_multiple_headlines_per_day() {
        let news = vec![
            scored("h1", 0.4, 2020, 3, 23),
            scored("h2", -0.2, 2020, 3, 23),
        ];
        let prices = vec![make_bar(2020, 3, 23, 100.0), make_bar(2020, 3, 24, 102.0)];
        let aggregates = align_and_aggregate(&news, &prices).unwrap();
        assert_eq!(aggregates[0].news_volume, 2);
        assert!((aggregates[0].avg_sentiment - 0.1).abs() < 1e-12);
    }

    // ── correlate ─────────────────────────────────────────────────────────────

    fn aggregate(d: u32, sentiment: f64, lagged: f64) -> DailyAggregate {
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2020, 3, d).unwrap(),
            avg_sentiment: sentiment,
            news_volume: 1,
            daily_return: Some(lagged),
            lagged_return: lagged,
        }
    }

    #[test]
    fn test_correlate_needs_two_rows() {
        let err = correlate(&[aggregate(23, 0.2, 0.05)]).unwrap_err();
        assert!(matches!(
            err,
            EdaError::InsufficientData { needed: 2, got: 1 }
        ));
    }

    #[test]
    fn test_correlate_perfectly_correlated() {
        let rows = vec![
            aggregate(23, 0.1, 0.01),
            aggregate(24, 0.2, 0.02),
            aggregate(25, 0.3, 0.03),
        ];
        let summary = correlate(&rows).unwrap();
        assert!((summary.lagged - 1.0).abs() < 1e-9);
        assert!((summary.same_day - 1.0).abs() < 1e-9);
        assert_eq!(summary.aligned_days, 3);
    }

    #[test]
    fn test_correlate_anti_correlated() {
        let rows = vec![
            aggregate(23, 0.1, -0.01),
            aggregate(24, 0.2, -0.02),
            aggregate(25, 0.3, -0.03),
        ];
        let summary = correlate(&rows).unwrap();
        assert!((summary.lagged + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlate_zero_variance_is_nan() {
        let rows = vec![aggregate(23, 0.2, 0.01), aggregate(24, 0.2, 0.02)];
        let summary = correlate(&rows).unwrap();
        assert!(summary.lagged.is_nan());
    }
}
