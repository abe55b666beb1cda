//! Descriptive statistics over the loaded news table: headline length
//! distribution and per-publisher activity.

use std::collections::HashMap;

use eda_core::error::{EdaError, Result};
use eda_core::models::NewsRecord;
use eda_core::stats;

// ── LengthStats ───────────────────────────────────────────────────────────────

/// Five-number summary (plus mean/std) of headline lengths in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute headline-length statistics. Needs at least 2 records for the
/// sample deviation to be defined.
pub fn headline_length_stats(records: &[NewsRecord]) -> Result<LengthStats> {
    if records.len() < 2 {
        return Err(EdaError::InsufficientData {
            needed: 2,
            got: records.len(),
        });
    }

    let mut lengths: Vec<f64> = records.iter().map(|r| r.headline_len as f64).collect();
    lengths.sort_by(|a, b| a.total_cmp(b));

    Ok(LengthStats {
        count: lengths.len(),
        mean: stats::mean(&lengths).unwrap_or(0.0),
        std: stats::std_sample(&lengths).unwrap_or(0.0),
        min: lengths[0],
        q25: stats::quantile_sorted(&lengths, 0.25).unwrap_or(0.0),
        median: stats::quantile_sorted(&lengths, 0.5).unwrap_or(0.0),
        q75: stats::quantile_sorted(&lengths, 0.75).unwrap_or(0.0),
        max: lengths[lengths.len() - 1],
    })
}

/// Article counts per raw publisher name, descending; ties broken by name.
pub fn publisher_activity(records: &[NewsRecord], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.publisher.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

// ── Tests ─────────────────────────────────────────────────────────────────────
