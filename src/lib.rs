//! Autostat: automatic statistical test selection
//!
//! A library for profiling pairwise relationships in tabular data:
//! classify columns by declared variable type, pick the appropriate
//! hypothesis test for every compatible pair, check its assumptions,
//! and collect the outcomes into one consolidated report.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod utils;
