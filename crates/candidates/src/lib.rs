//! # Candidates Crate
//!
//! This crate picks which beers a new user should be asked to rate.
//!
//! ## Components
//!
//! ### CandidateSelector
//! Bounded per-style lists of the most-reviewed beers:
//! - Popular items carry enough historical ratings for collaborative
//!   filtering to latch onto
//! - The per-style limit keeps the rating form (and the downstream matrix)
//!   at a manageable size
//!
//! ## Example Usage
//!
//! ```ignore
//! use candidates::CandidateSelector;
//! use catalog::{Catalog, Style};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_csv("data/beer_reviews.csv".as_ref())?);
//! let selector = CandidateSelector::new(catalog.clone());
//!
//! // 100 well-known beers per style, across all styles
//! let ratable = selector.select(&[], 100);
//!
//! // Or 1000 per style when the user already named favorites
//! let ipas = selector.select(&[Style::Ipa], 1000);
//! ```

// Public modules
pub mod selector;

// Re-export commonly used types
pub use selector::CandidateSelector;
