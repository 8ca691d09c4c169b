//! Candidate selection for the rating step.
//!
//! Before the engine can say anything about a new user, the user has to rate
//! a handful of beers. This module picks which beers are worth putting in
//! front of them: the most-reviewed beers per style, so the ratings land on
//! items with enough historical signal to be useful.

use catalog::{Catalog, Item, Style};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Selects a bounded, per-style list of well-known beers for the user to
/// rate.
///
/// ## Algorithm
/// 1. For each requested style, collect the style's items
/// 2. Sort by review count descending (ties by item id, which the style
///    index already provides)
/// 3. Truncate to the per-style limit
pub struct CandidateSelector {
    /// Shared reference to the catalog
    catalog: Arc<Catalog>,
}

impl CandidateSelector {
    /// Create a new selector over the given catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Select up to `limit_per_style` well-reviewed items for each style.
    ///
    /// An empty `styles` slice means "all styles present in the catalog",
    /// matching the rating form's behavior when no favorite style is picked.
    #[instrument(skip(self))]
    pub fn select(&self, styles: &[Style], limit_per_style: usize) -> Vec<Item> {
        let styles: Vec<Style> = if styles.is_empty() {
            self.catalog.styles_present()
        } else {
            styles.to_vec()
        };

        let mut selected = Vec::new();
        for style in styles {
            let mut ranked: Vec<&str> = self
                .catalog
                .items_in_style(style)
                .iter()
                .map(|id| id.as_str())
                .collect();

            // Stable sort keeps the sorted-id order of the style index for
            // items with equal review counts.
            ranked.sort_by_key(|id| {
                std::cmp::Reverse(
                    self.catalog
                        .get_item_stats(id)
                        .map(|s| s.rating_count)
                        .unwrap_or(0),
                )
            });
            ranked.truncate(limit_per_style);

            debug!("Selected {} candidates for style {}", ranked.len(), style);
            selected.extend(
                ranked
                    .into_iter()
                    .filter_map(|id| self.catalog.get_item(id).cloned()),
            );
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::RatingRecord;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();

        for (id, style) in [
            ("Alpha", Style::Ipa),
            ("Bravo", Style::Ipa),
            ("Charlie", Style::Ipa),
            ("Delta", Style::Stout),
        ] {
            catalog.insert_item(Item {
                id: id.to_string(),
                style,
                brewery: "Test Brewing".to_string(),
            });
        }

        // Bravo is the most reviewed IPA, Charlie second, Alpha last
        for (item, count) in [("Alpha", 1), ("Bravo", 5), ("Charlie", 3), ("Delta", 2)] {
            for i in 0..count {
                catalog.insert_rating(RatingRecord {
                    user_id: format!("user-{}", i),
                    item_id: item.to_string(),
                    rating: 4.0,
                });
            }
        }

        catalog.build_style_index();
        catalog.compute_item_stats();
        catalog
    }

    #[test]
    fn test_select_orders_by_review_count() {
        let selector = CandidateSelector::new(Arc::new(create_test_catalog()));

        let selected = selector.select(&[Style::Ipa], 10);
        let ids: Vec<&str> = selected.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, vec!["Bravo", "Charlie", "Alpha"]);
    }

    #[test]
    fn test_select_respects_limit() {
        let selector = CandidateSelector::new(Arc::new(create_test_catalog()));

        let selected = selector.select(&[Style::Ipa], 2);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "Bravo");
        assert_eq!(selected[1].id, "Charlie");
    }

    #[test]
    fn test_select_empty_styles_means_all() {
        let selector = CandidateSelector::new(Arc::new(create_test_catalog()));

        let selected = selector.select(&[], 10);
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().any(|i| i.style == Style::Stout));
    }

    #[test]
    fn test_select_unknown_style_is_empty() {
        let selector = CandidateSelector::new(Arc::new(create_test_catalog()));

        let selected = selector.select(&[Style::Ginger], 10);
        assert!(selected.is_empty());
    }
}
