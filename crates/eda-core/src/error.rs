use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the news-EDA toolkit.
#[derive(Error, Debug)]
pub enum EdaError {
    /// An input CSV does not exist on disk.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required column is absent from an input CSV.
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The CSV reader failed to open or decode a file.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A statistic was requested over fewer rows than it needs.
    #[error("Insufficient data: needed {needed} rows, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Correlation was requested before sentiment scoring ran.
    #[error("Sentiment scores missing: run score_sentiment first")]
    SentimentMissing,

    /// An optional capability (e.g. word-cloud rendering) is unavailable.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The chart backend failed while drawing a figure.
    #[error("Render error: {0}")]
    Render(String),

    /// A configuration file or value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the EDA crates.
pub type Result<T> = std::result::Result<T, EdaError>;
