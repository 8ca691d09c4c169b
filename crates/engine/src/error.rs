//! Error types for the recommendation engine.
//!
//! Only hard preconditions surface as errors. Everything else the engine can
//! hit mid-request (unknown rated items, an empty affinity result) is
//! recovered locally and logged, so one bad rating never aborts the whole
//! request.

use thiserror::Error;

/// Errors that can occur while computing recommendations
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The user supplied too few usable ratings.
    ///
    /// Raised both for a too-small input set and when dropping unknown item
    /// ids during the catalog join leaves fewer than the required count.
    #[error("Need at least {required} ratings, got {supplied}")]
    InsufficientRatings { supplied: usize, required: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
