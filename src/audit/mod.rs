//! Cumulative analysis log.
//!
//! Tracks how many submissions and events the engine has processed, without
//! storing any submission content.

pub mod log;

pub use log::{AnalysisLog, AnalysisStats};
