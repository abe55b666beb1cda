//! CSV discovery and loading for the news-EDA toolkit.
//!
//! Reads the news headline table and per-ticker OHLCV price series from
//! disk and converts them into [`eda_core::models`] structs for the
//! analyses downstream.

pub mod news;
pub mod prices;

pub use news::load_news;
pub use prices::{find_price_files, PriceDataset};
