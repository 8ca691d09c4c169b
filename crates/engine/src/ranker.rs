//! Top-N ranking within one style.
//!
//! Walks the catalog's style index (sorted item-id order), skips everything
//! the user already rated, and orders the rest by predicted rating. The sort
//! is stable, so score ties keep catalog iteration order. Truncation to the
//! final N is the caller's job.

use catalog::{Catalog, ItemId, Style};
use std::collections::{HashMap, HashSet};

/// Rank every unseen item in `style` by predicted rating, descending.
///
/// Items missing from the prediction map score 0.0; that only happens when
/// an item was filtered out of the matrix entirely, since an unrated column
/// still gets a reconstructed value. An empty result is valid and means
/// "no novel items to recommend in this style".
pub fn rank_unseen(
    catalog: &Catalog,
    style: Style,
    predicted: &HashMap<ItemId, f64>,
    rated: &HashSet<ItemId>,
) -> Vec<ItemId> {
    let mut scored: Vec<(&ItemId, f64)> = catalog
        .items_in_style(style)
        .iter()
        .filter(|item_id| !rated.contains(item_id.as_str()))
        .map(|item_id| (item_id, predicted.get(item_id).copied().unwrap_or(0.0)))
        .collect();

    // Stable: ties keep the style index's sorted-id order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().map(|(item_id, _)| item_id.clone()).collect()
}
