//! Catalog building and indexing logic.
//!
//! This module builds the `Catalog` from parsed review rows:
//! - Insert items and historical ratings
//! - Build the style index (sorted per style for deterministic iteration)
//! - Compute aggregate item statistics in parallel
//! - Validate data integrity before the catalog is handed out

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load the beer review catalog from a CSV file.
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the review CSV (rows parsed in parallel)
    /// 2. Build primary stores (items, per-item ratings)
    /// 3. Build the style index
    /// 4. Compute item statistics
    /// 5. Validate data integrity
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        info!("Loading beer review catalog from {:?}", path);

        let rows = parser::parse_reviews(path)?;
        info!("Parsed {} review rows", rows.len());

        let mut catalog = Catalog::new();
        for row in rows {
            catalog.insert_item(row.item);
            catalog.insert_rating(row.rating);
        }

        catalog.build_style_index();
        catalog.compute_item_stats();
        catalog.validate()?;

        let (items, ratings) = catalog.counts();
        info!("Catalog built: {} items, {} ratings", items, ratings);
        Ok(catalog)
    }

    /// Build the style index after primary data is loaded.
    ///
    /// Each per-style list is sorted ascending by item id; this ordering is
    /// the catalog iteration order the ranker uses to break score ties.
    pub fn build_style_index(&mut self) {
        self.style_index.clear();
        for (item_id, item) in &self.items {
            self.style_index
                .entry(item.style)
                .or_default()
                .push(item_id.clone());
        }
        for ids in self.style_index.values_mut() {
            ids.sort_unstable();
        }
    }

    /// Compute aggregate statistics for all items.
    ///
    /// For each item: average rating, rating count, and a popularity score
    /// that rewards both high ratings and many ratings.
    pub fn compute_item_stats(&mut self) {
        let item_stats = self
            .item_ratings
            .par_iter()
            .map(|(item_id, ratings)| {
                let rating_count = ratings.len() as u32;
                let avg_rating = if rating_count > 0 {
                    let total: f32 = ratings.iter().map(|r| r.rating).sum();
                    total / rating_count as f32
                } else {
                    0.0
                };
                let popularity_score = compute_popularity_score(avg_rating, rating_count);

                (
                    item_id.clone(),
                    ItemStats {
                        avg_rating,
                        rating_count,
                        popularity_score,
                    },
                )
            })
            .collect();
        self.item_stats = item_stats;
    }

    /// Validate data integrity.
    ///
    /// Check that:
    /// - All rating.item_id references exist in the item map
    /// - Ratings are in the valid range (1.0 - 5.0)
    pub fn validate(&self) -> Result<()> {
        for ratings in self.item_ratings.values() {
            for rating in ratings {
                if !self.items.contains_key(&rating.item_id) {
                    return Err(CatalogError::ValidationError(format!(
                        "Rating references unknown item: {}",
                        rating.item_id
                    )));
                }
                if rating.rating < 1.0 || rating.rating > 5.0 {
                    return Err(CatalogError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Helper function to compute popularity score.
///
/// avg_rating * log(rating_count + 1): rewards both high ratings and many
/// ratings.
fn compute_popularity_score(avg_rating: f32, rating_count: u32) -> f32 {
    avg_rating * (rating_count as f32 + 1.0).ln()
}
