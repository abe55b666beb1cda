//! Core types shared by every layer of the news-EDA toolkit: the error
//! taxonomy, data model, timestamp/calendar helpers, numeric statistics
//! and injected configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod settings;
pub mod stats;
pub mod time_utils;

pub use error::{EdaError, Result};
