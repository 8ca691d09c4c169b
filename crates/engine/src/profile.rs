//! Helper functions to build a UserProfile from raw ratings.
//!
//! This module joins the user's raw `{item_id -> rating}` map against the
//! catalog so every downstream stage can rely on style-tagged entries and an
//! O(1) rated-items set.

use crate::error::{RecommendError, Result};
use catalog::{Catalog, ItemId, Style};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Minimum number of usable ratings required before the engine will run.
pub const MIN_RATINGS: usize = 5;

/// One of the target user's own ratings, tagged with the item's style.
#[derive(Debug, Clone)]
pub struct UserRating {
    pub item_id: ItemId,
    pub style: Style,
    pub rating: f32,
}

/// The target user's rating set after the catalog join.
///
/// Entries are ordered by item id (the input map is a `BTreeMap`), so every
/// computation over the profile is invariant to the order ratings arrived in.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub entries: Vec<UserRating>,
    pub rated_items: HashSet<ItemId>,
}

impl UserProfile {
    /// The styles the user has rated, in profile entry order, deduplicated.
    pub fn styles_rated(&self) -> Vec<Style> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.style)
            .filter(|style| seen.insert(*style))
            .collect()
    }
}

/// Build a UserProfile by joining raw ratings against the catalog.
///
/// A rated item id the catalog doesn't know is dropped with a warning
/// rather than failing the request. The minimum-ratings precondition is
/// checked on the raw input and re-checked after the join, since dropping
/// unknown items can push the set below the threshold.
pub fn build_user_profile(
    catalog: &Catalog,
    ratings: &BTreeMap<ItemId, f32>,
) -> Result<UserProfile> {
    if ratings.len() < MIN_RATINGS {
        return Err(RecommendError::InsufficientRatings {
            supplied: ratings.len(),
            required: MIN_RATINGS,
        });
    }

    let mut profile = UserProfile::default();
    for (item_id, &rating) in ratings {
        match catalog.get_item(item_id) {
            Some(item) => {
                profile.entries.push(UserRating {
                    item_id: item_id.clone(),
                    style: item.style,
                    rating,
                });
                profile.rated_items.insert(item_id.clone());
            }
            None => {
                warn!("Dropping rating for unknown item: {}", item_id);
            }
        }
    }

    if profile.entries.len() < MIN_RATINGS {
        return Err(RecommendError::InsufficientRatings {
            supplied: profile.entries.len(),
            required: MIN_RATINGS,
        });
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Item;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, style) in [
            ("Alpha", Style::Ipa),
            ("Bravo", Style::Ipa),
            ("Charlie", Style::Stout),
            ("Delta", Style::Porter),
            ("Echo", Style::Wheat),
        ] {
            catalog.insert_item(Item {
                id: id.to_string(),
                style,
                brewery: "Test Brewing".to_string(),
            });
        }
        catalog.build_style_index();
        catalog
    }

    fn ratings_of(pairs: &[(&str, f32)]) -> BTreeMap<ItemId, f32> {
        pairs
            .iter()
            .map(|(id, r)| (id.to_string(), *r))
            .collect()
    }

    #[test]
    fn test_build_profile_joins_styles() {
        let catalog = create_test_catalog();
        let ratings = ratings_of(&[
            ("Alpha", 5.0),
            ("Bravo", 4.0),
            ("Charlie", 3.5),
            ("Delta", 4.0),
            ("Echo", 2.0),
        ]);

        let profile = build_user_profile(&catalog, &ratings).unwrap();
        assert_eq!(profile.entries.len(), 5);
        assert_eq!(profile.entries[0].item_id, "Alpha");
        assert_eq!(profile.entries[0].style, Style::Ipa);
        assert!(profile.rated_items.contains("Echo"));
    }

    #[test]
    fn test_too_few_ratings_rejected() {
        let catalog = create_test_catalog();
        let ratings = ratings_of(&[("Alpha", 5.0), ("Bravo", 4.0)]);

        let err = build_user_profile(&catalog, &ratings).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::InsufficientRatings {
                supplied: 2,
                required: MIN_RATINGS
            }
        ));
    }

    #[test]
    fn test_unknown_item_dropped_not_fatal() {
        let catalog = create_test_catalog();
        let ratings = ratings_of(&[
            ("Alpha", 5.0),
            ("Bravo", 4.0),
            ("Charlie", 3.5),
            ("Delta", 4.0),
            ("Echo", 2.0),
            ("Ghost", 1.0),
        ]);

        let profile = build_user_profile(&catalog, &ratings).unwrap();
        assert_eq!(profile.entries.len(), 5);
        assert!(!profile.rated_items.contains("Ghost"));
    }

    #[test]
    fn test_dropping_unknown_items_can_fall_below_minimum() {
        let catalog = create_test_catalog();
        let ratings = ratings_of(&[
            ("Alpha", 5.0),
            ("Bravo", 4.0),
            ("Charlie", 3.5),
            ("Delta", 4.0),
            ("Ghost", 1.0),
        ]);

        let err = build_user_profile(&catalog, &ratings).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::InsufficientRatings { supplied: 4, .. }
        ));
    }

    #[test]
    fn test_styles_rated_dedupes() {
        let catalog = create_test_catalog();
        let ratings = ratings_of(&[
            ("Alpha", 5.0),
            ("Bravo", 4.0),
            ("Charlie", 3.5),
            ("Delta", 4.0),
            ("Echo", 2.0),
        ]);

        let profile = build_user_profile(&catalog, &ratings).unwrap();
        let styles = profile.styles_rated();
        assert_eq!(styles.len(), 4); // Ipa appears twice but is listed once
        assert_eq!(styles[0], Style::Ipa);
    }
}
