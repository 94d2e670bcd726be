//! Report module - ordering, rendering, and export of test results

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
