//! Core recommendation engine: collaborative filtering over the beer
//! review catalog, blended with one new user's explicit ratings.
//!
//! This crate provides:
//! - Profile join of raw user ratings against the catalog
//! - Style affinity estimation from the user's own ratings
//! - Rating matrix construction (history + user, deduplicated by mean)
//! - Truncated latent factor model with seeded, deterministic fitting
//! - Per-style top-N ranking of unseen items
//!
//! ## Architecture
//! `Recommender::recommend` composes the stages in order:
//! 1. profile: join ratings with the catalog, drop unknown items
//! 2. affinity: pick preferred styles (or honor an explicit list)
//! 3. matrix: pivot filtered history + user ratings into a dense matrix
//! 4. latent: factorize and reconstruct the target user's row
//! 5. ranker: order unseen items per style, truncate to N
//!
//! ## Example Usage
//! ```ignore
//! use engine::{Recommender, RecommendRequest};
//! use std::sync::Arc;
//!
//! let recommender = Recommender::new(Arc::new(catalog));
//! let request = RecommendRequest {
//!     ratings: my_ratings,   // BTreeMap<ItemId, f32>, at least 5 entries
//!     styles: vec![],        // empty: infer favorites from the ratings
//! };
//!
//! for style_recs in recommender.recommend(&request)? {
//!     println!("{}: {:?}", style_recs.style, style_recs.items);
//! }
//! ```

pub mod affinity;
pub mod error;
pub mod latent;
pub mod matrix;
pub mod profile;
pub mod ranker;
pub mod recommender;

// Re-export main types
pub use affinity::StyleAffinity;
pub use error::{RecommendError, Result};
pub use latent::LatentModel;
pub use matrix::{RatingMatrix, TARGET_USER};
pub use profile::{UserProfile, MIN_RATINGS};
pub use recommender::{RecommendRequest, Recommender, StyleRecommendations};
