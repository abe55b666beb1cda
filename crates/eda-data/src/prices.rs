//! Per-ticker OHLCV price loading.
//!
//! Price files live under a data directory as `{SYMBOL}.csv` with
//! `Date,Open,High,Low,Close,Volume` columns. Headers are normalised to
//! title case so exports with `' OPEN '`-style headers still load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use eda_core::error::{EdaError, Result};
use eda_core::models::PriceBar;
use eda_core::time_utils::TimestampParser;
use tracing::{debug, info, warn};

const REQUIRED: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_dir`, sorted by path.
pub fn find_price_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Price data path does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── PriceDataset ──────────────────────────────────────────────────────────────

/// Locates and loads per-ticker price CSVs under a fixed data directory.
pub struct PriceDataset {
    data_dir: PathBuf,
}

impl PriceDataset {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The expected path of a ticker's CSV.
    pub fn csv_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}.csv"))
    }

    /// Ticker symbols implied by the CSV files present in the data dir.
    pub fn available_tickers(&self) -> Vec<String> {
        find_price_files(&self.data_dir)
            .iter()
            .filter_map(|p| p.file_stem())
            .filter_map(|s| s.to_str())
            .map(|s| s.to_string())
            .collect()
    }

    /// Load the ticker's bars, sorted ascending and unique by date
    /// (the last row wins on duplicates).
    pub fn load(&self, ticker: &str) -> Result<Vec<PriceBar>> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(EdaError::FileNotFound(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&path)?;

        let headers = reader.headers()?.clone();
        let mut idx = [0usize; 6];
        for (i, name) in REQUIRED.iter().enumerate() {
            idx[i] = find_column(&headers, name).ok_or_else(|| EdaError::MissingColumn {
                path: path.clone(),
                column: name.to_string(),
            })?;
        }
        let [date_i, open_i, high_i, low_i, close_i, volume_i] = idx;

        let mut by_date: BTreeMap<chrono::NaiveDate, PriceBar> = BTreeMap::new();
        let mut rows_skipped = 0u64;

        for row in reader.records() {
            let row = row?;

            let parsed = parse_bar(&row, date_i, open_i, high_i, low_i, close_i, volume_i);
            match parsed {
                Some(bar) => {
                    by_date.insert(bar.date, bar);
                }
                None => {
                    rows_skipped += 1;
                    debug!("Skipping malformed price row in {}", path.display());
                }
            }
        }

        let bars: Vec<PriceBar> = by_date.into_values().collect();
        info!(
            "Loaded {}: {} bars ({} rows skipped)",
            ticker,
            bars.len(),
            rows_skipped
        );

        Ok(bars)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Match a header against a required title-case name after normalising
/// (`' OPEN '` → `Open`).
fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| normalize_header(h) == name)
}

fn normalize_header(header: &str) -> String {
    let trimmed = header.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn parse_bar(
    row: &StringRecord,
    date_i: usize,
    open_i: usize,
    high_i: usize,
    low_i: usize,
    close_i: usize,
    volume_i: usize,
) -> Option<PriceBar> {
    let date = TimestampParser::parse_date(row.get(date_i)?)?;
    let open: f64 = row.get(open_i)?.parse().ok()?;
    let high: f64 = row.get(high_i)?.parse().ok()?;
    let low: f64 = row.get(low_i)?.parse().ok()?;
    let close: f64 = row.get(close_i)?.parse().ok()?;
    // Volume sometimes arrives as a float ("1234.0").
    let volume_raw = row.get(volume_i)?;
    let volume: u64 = volume_raw
        .parse::<u64>()
        .ok()
        .or_else(|| volume_raw.parse::<f64>().ok().map(|v| v.round() as u64))?;

    Some(PriceBar {
        date,
        open,
        high,
        low,
        close,
        volume,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
