//! Error handling and run statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, ranking and apex resolution
//! - Per-line outcome statistics for a run

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ApexError, FetchStep, InitializationError, LineOutcome, RankError};
