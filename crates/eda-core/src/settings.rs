use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Exploratory analysis of financial news headlines and ticker price series
#[derive(Parser, Debug, Clone)]
#[command(
    name = "news-eda",
    about = "Exploratory analysis of financial news headlines and ticker price series",
    version
)]
pub struct Settings {
    /// Path to the news headlines CSV (date, headline, publisher columns)
    #[arg(long, default_value = "data/raw_analyst_ratings.csv")]
    pub news: PathBuf,

    /// Ticker symbol to analyse; repeatable. Defaults to every CSV found
    /// under the price data directory.
    #[arg(long = "ticker", value_name = "SYMBOL")]
    pub tickers: Vec<String>,

    /// Directory containing per-ticker OHLCV CSVs named {SYMBOL}.csv
    #[arg(long, default_value = "data/yfinance_data")]
    pub data_dir: PathBuf,

    /// Directory for generated figures and the indicator panel
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// Rolling-mean window (days) for the daily-volume series
    #[arg(long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=365))]
    pub window: u32,

    /// How many top publishers / domains / terms to report
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub top_n: u32,

    /// Minimum number of headlines a term must appear in
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub min_doc_freq: u32,

    /// JSON file with extra publisher -> domain aliases
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// JSON file replacing the built-in market-event calendar
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Skip figure rendering; print console summaries only
    #[arg(long)]
    pub no_figures: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::parse_from(["news-eda"]);
        assert_eq!(settings.news, PathBuf::from("data/raw_analyst_ratings.csv"));
        assert_eq!(settings.data_dir, PathBuf::from("data/yfinance_data"));
        assert_eq!(settings.out_dir, PathBuf::from("reports"));
        assert_eq!(settings.window, 7);
        assert_eq!(settings.top_n, 10);
        assert_eq!(settings.min_doc_freq, 5);
        assert!(settings.tickers.is_empty());
        assert!(!settings.no_figures);
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_settings_repeatable_tickers() {
        let settings = Settings::parse_from(["news-eda", "--ticker", "AAPL", "--ticker", "MSFT"]);
        assert_eq!(settings.tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_settings_window_range_rejects_zero() {
        let result = Settings::try_parse_from(["news-eda", "--window", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_log_level_restricted() {
        let result = Settings::try_parse_from(["news-eda", "--log-level", "TRACE"]);
        assert!(result.is_err());
    }
}
