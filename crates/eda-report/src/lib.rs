//! Figure rendering for the analysis results: PNG charts via plotters
//! and a size-scaled word-cloud grid.

pub mod charts;
pub mod wordcloud;
