//! Pipeline module - type resolution, pairwise dispatch, and scenario handlers

pub mod dispatch;
pub mod loader;
mod scenarios;
pub mod types;

pub use dispatch::*;
pub use loader::*;
pub use types::*;
