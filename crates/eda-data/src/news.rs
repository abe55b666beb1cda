//! News headline CSV loading.
//!
//! The export carries at least `date`, `headline` and `publisher` columns
//! (matched case-insensitively) and mixes timezone-aware and naive
//! timestamp strings; every row is normalised to UTC at load time.

use std::path::Path;

use csv::StringRecord;
use eda_core::error::{EdaError, Result};
use eda_core::models::NewsRecord;
use eda_core::time_utils::TimestampParser;
use tracing::{debug, info};

/// Load and parse the news CSV into [`NewsRecord`]s, sorted by timestamp.
///
/// Rows whose timestamp cannot be parsed are skipped with a debug log;
/// a missing file or a missing required column aborts the load.
pub fn load_news(path: &Path) -> Result<Vec<NewsRecord>> {
    if !path.exists() {
        return Err(EdaError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let date_idx = require_column(&headers, "date", path)?;
    let headline_idx = require_column(&headers, "headline", path)?;
    let publisher_idx = require_column(&headers, "publisher", path)?;

    let mut records: Vec<NewsRecord> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_skipped = 0u64;

    for row in reader.records() {
        let row = row?;
        rows_read += 1;

        let (Some(date_str), Some(headline), Some(publisher)) = (
            row.get(date_idx),
            row.get(headline_idx),
            row.get(publisher_idx),
        ) else {
            rows_skipped += 1;
            continue;
        };

        let Some(timestamp) = TimestampParser::parse(date_str) else {
            debug!("Skipping row {} with unparseable date: {}", rows_read, date_str);
            rows_skipped += 1;
            continue;
        };

        records.push(NewsRecord::new(publisher, headline, timestamp));
    }

    records.sort_by_key(|r| r.timestamp);

    info!(
        "Loaded {} news records from {} ({} rows skipped)",
        records.len(),
        path.display(),
        rows_skipped
    );

    Ok(records)
}

/// Find a header by case-insensitive, trimmed name.
fn require_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| EdaError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
