//! Schema module - Configuration and test-suite types for search runs.

mod config;
mod suite;

pub use config::*;
pub use suite::*;
