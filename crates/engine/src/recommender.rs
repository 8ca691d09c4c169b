//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Join the user's ratings against the catalog
//! 2. Infer preferred styles (or take the caller's explicit list)
//! 3. Merge style-filtered history with the user's ratings into a matrix
//! 4. Fit the latent factor model and predict the target row
//! 5. Rank unseen items per style and keep the top N
//!
//! One call runs synchronously to completion; the matrix and model live and
//! die inside it. The catalog is the only shared state, and it is immutable.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use catalog::{Catalog, Item, ItemId, RatingRecord, Style};

use crate::affinity;
use crate::error::Result;
use crate::latent::LatentModel;
use crate::matrix::RatingMatrix;
use crate::profile::build_user_profile;
use crate::ranker;

/// Default factorization seed; fixed so identical requests produce
/// identical recommendations.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of recommendations per style
pub const DEFAULT_TOP_N: usize = 5;

/// One recommendation request: the user's own ratings plus an optional
/// explicit style list. Ratings are keyed by item id in a `BTreeMap`, so a
/// request's meaning never depends on insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecommendRequest {
    pub ratings: std::collections::BTreeMap<ItemId, f32>,
    /// Explicit favorite styles; empty means "infer from the ratings"
    pub styles: Vec<Style>,
}

/// Recommendations for one style, best first
#[derive(Debug, Clone)]
pub struct StyleRecommendations {
    pub style: Style,
    pub items: Vec<Item>,
}

/// Main entry point composing the core pipeline stages
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    seed: u64,
    top_n: usize,
}

impl Recommender {
    /// Create a recommender over a loaded catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            seed: DEFAULT_SEED,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Override the factorization seed (default: 42)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the per-style recommendation count (default: 5)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Compute per-style recommendations for one user.
    ///
    /// Precondition: at least 5 usable ratings, else
    /// `RecommendError::InsufficientRatings`. Returns one entry per
    /// preferred style, in preference order; an entry's item list may be
    /// shorter than N (or empty) when the style has few novel items.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Vec<StyleRecommendations>> {
        let start_time = Instant::now();

        let profile = build_user_profile(&self.catalog, &request.ratings)?;
        info!("Built user profile with {} ratings", profile.entries.len());

        let styles = affinity::preferred_styles(&profile, &request.styles);
        info!(
            "Recommending for {} style(s): {:?}",
            styles.len(),
            styles.iter().map(|s| s.label()).collect::<Vec<_>>()
        );

        let historical: Vec<&RatingRecord> =
            self.catalog.ratings_for_styles(&styles).collect();
        info!("Using {} historical ratings after style filter", historical.len());

        let matrix = RatingMatrix::build(historical, &profile);
        let (rows, cols) = matrix.shape();
        info!("Built {}x{} rating matrix", rows, cols);

        let model = LatentModel::fit(&matrix, self.seed);
        let predicted = model.predict_target(&matrix);
        info!(
            "Fitted rank-{} model, predicted {} items",
            model.rank(),
            predicted.len()
        );

        let recommendations = styles
            .into_iter()
            .map(|style| {
                let mut ranked =
                    ranker::rank_unseen(&self.catalog, style, &predicted, &profile.rated_items);
                ranked.truncate(self.top_n);
                StyleRecommendations {
                    style,
                    items: ranked
                        .into_iter()
                        .filter_map(|item_id| self.catalog.get_item(&item_id).cloned())
                        .collect(),
                }
            })
            .collect();

        info!("Recommendation request served in {:.2?}", start_time.elapsed());
        Ok(recommendations)
    }
}

/// Items the profile has rated, as a set of ids. Exposed for callers that
/// want to post-filter presentation output.
pub fn rated_item_ids(request: &RecommendRequest) -> HashSet<ItemId> {
    request.ratings.keys().cloned().collect()
}
