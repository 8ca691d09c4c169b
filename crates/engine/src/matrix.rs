//! Rating matrix construction.
//!
//! Merges historical community ratings with the target user's own ratings
//! into one dense user-by-item matrix. The group-by-mean-then-pivot is done
//! explicitly: a hash map keyed by (user, item) accumulates (sum, count),
//! means are emitted, and the matrix is filled by iterating sorted unique
//! row and column keys so the layout is deterministic. Absent cells hold
//! 0.0, an explicit "no rating" sentinel.

use crate::profile::UserProfile;
use catalog::{ItemId, RatingRecord, UserId};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};

/// Reserved row id for the target user. Chosen so it cannot collide with a
/// reviewer profile name from the catalog.
pub const TARGET_USER: &str = "__me__";

/// Dense user-by-item rating matrix for one recommendation request.
///
/// Rows and columns are sorted by id; cell values are merged mean ratings,
/// 0.0 where a user never rated an item. Built fresh per request and
/// discarded with it.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    values: Array2<f64>,
    row_ids: Vec<UserId>,
    col_ids: Vec<ItemId>,
    col_index: HashMap<ItemId, usize>,
    target_row: Option<usize>,
}

impl RatingMatrix {
    /// Build the matrix from style-filtered historical records plus the
    /// target user's profile.
    ///
    /// The user's own items always become columns even if they fall outside
    /// the filtered historical set, because the user's records are part of
    /// the concatenation.
    pub fn build<'a, I>(historical: I, profile: &UserProfile) -> Self
    where
        I: IntoIterator<Item = &'a RatingRecord>,
    {
        // Group by (user, item), accumulating (sum, count); duplicates
        // collapse to their mean.
        let mut merged: HashMap<(UserId, ItemId), (f64, u32)> = HashMap::new();
        for record in historical {
            let slot = merged
                .entry((record.user_id.clone(), record.item_id.clone()))
                .or_insert((0.0, 0));
            slot.0 += record.rating as f64;
            slot.1 += 1;
        }
        for entry in &profile.entries {
            let slot = merged
                .entry((TARGET_USER.to_string(), entry.item_id.clone()))
                .or_insert((0.0, 0));
            slot.0 += entry.rating as f64;
            slot.1 += 1;
        }

        // Sorted unique keys give a deterministic pivot; row order does not
        // affect the factorization result, so no shuffling.
        let mut row_set = BTreeSet::new();
        let mut col_set = BTreeSet::new();
        for (user_id, item_id) in merged.keys() {
            row_set.insert(user_id.clone());
            col_set.insert(item_id.clone());
        }
        let row_ids: Vec<UserId> = row_set.into_iter().collect();
        let col_ids: Vec<ItemId> = col_set.into_iter().collect();

        let row_index: HashMap<UserId, usize> = row_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let col_index: HashMap<ItemId, usize> = col_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let mut values = Array2::zeros((row_ids.len(), col_ids.len()));
        for ((user_id, item_id), (sum, count)) in merged {
            values[[row_index[&user_id], col_index[&item_id]]] = sum / count as f64;
        }

        let target_row = row_index.get(TARGET_USER).copied();

        Self {
            values,
            row_ids,
            col_ids,
            col_index,
            target_row,
        }
    }

    /// The dense value matrix, rows = users, cols = items
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Row position of the reserved target user, if present
    pub fn target_row(&self) -> Option<usize> {
        self.target_row
    }

    /// Column item ids, in column order
    pub fn item_ids(&self) -> &[ItemId] {
        &self.col_ids
    }

    /// Row user ids, in row order
    pub fn user_ids(&self) -> &[UserId] {
        &self.row_ids
    }

    /// Merged cell value for a (user, item) pair, if both exist
    pub fn get(&self, user_id: &str, item_id: &str) -> Option<f64> {
        let row = self.row_ids.binary_search_by(|id| id.as_str().cmp(user_id)).ok()?;
        let col = self.col_index.get(item_id)?;
        Some(self.values[[row, *col]])
    }
}
