//! The analyses: descriptive statistics, time-series publication patterns,
//! headline text frequencies, publisher/domain aggregation, the
//! sentiment-vs-return correlation study and the technical indicator
//! wrapper.

pub mod correlation;
pub mod descriptive;
pub mod publisher;
pub mod technical;
pub mod text;
pub mod time_series;
