//! Low-rank latent factor model.
//!
//! Factorizes the rating matrix into user and item feature spaces with a
//! randomized subspace iteration (range finder + power iterations +
//! modified Gram-Schmidt re-orthonormalization): `Q [rows x k]` spans the
//! approximate column space of the matrix, `B = Qt * A [k x cols]` holds the
//! item features, and `Q * B` is the reconstruction the predictions are read
//! from. The random test matrix comes from a seeded `StdRng`, so the whole
//! fit is deterministic for a fixed seed.

use crate::matrix::RatingMatrix;
use catalog::ItemId;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

/// Upper bound on the factorization rank, for performance.
pub const MAX_RANK: usize = 50;

/// Subspace power iterations. Two passes is plenty for rating matrices of
/// this size; each pass sharpens the separation between kept and discarded
/// singular directions.
const POWER_ITERATIONS: usize = 2;

/// Factorization rank for a rows x cols matrix.
///
/// k = min(50, max(2, min(rows-1, cols-1))): never at or above either
/// dimension, never below 2 (a single-factor fit is degenerate), capped for
/// performance.
pub fn select_rank(rows: usize, cols: usize) -> usize {
    MAX_RANK
        .min(2.max(rows.saturating_sub(1).min(cols.saturating_sub(1))))
}

/// User and item feature spaces for one fitted rating matrix.
///
/// Ephemeral: owned by the request that built it, never shared or reused.
#[derive(Debug, Clone)]
pub struct LatentModel {
    /// [rows x k]
    user_features: Array2<f64>,
    /// [k x cols]
    item_features: Array2<f64>,
}

impl LatentModel {
    /// Fit a truncated factorization of the matrix.
    ///
    /// Rank-deficient inputs are fine: directions beyond the matrix's actual
    /// rank come out as zero columns in `Q` and contribute nothing to the
    /// reconstruction.
    pub fn fit(matrix: &RatingMatrix, seed: u64) -> Self {
        let a = matrix.values();
        let (rows, cols) = a.dim();
        let k = select_rank(rows, cols);
        debug!("Fitting latent model: {}x{} matrix, rank {}", rows, cols, k);

        let mut rng = StdRng::seed_from_u64(seed);
        let omega = Array2::from_shape_fn((cols, k), |_| rng.random::<f64>() * 2.0 - 1.0);

        // Range finder: Q spans A * omega
        let mut q = a.dot(&omega);
        orthonormalize(&mut q);

        // Power iterations pull Q toward the dominant singular directions
        for _ in 0..POWER_ITERATIONS {
            let mut z = a.t().dot(&q);
            orthonormalize(&mut z);
            q = a.dot(&z);
            orthonormalize(&mut q);
        }

        let item_features = q.t().dot(a);
        Self {
            user_features: q,
            item_features,
        }
    }

    /// Factorization rank
    pub fn rank(&self) -> usize {
        self.user_features.ncols()
    }

    /// User feature matrix [rows x k]
    pub fn user_features(&self) -> &Array2<f64> {
        &self.user_features
    }

    /// Item feature matrix [k x cols]
    pub fn item_features(&self) -> &Array2<f64> {
        &self.item_features
    }

    /// Full reconstruction `user_features * item_features`
    pub fn reconstruct(&self) -> Array2<f64> {
        self.user_features.dot(&self.item_features)
    }

    /// Predicted ratings for the target user across every item column.
    ///
    /// Values are unbounded reals; only their relative order matters
    /// downstream. If the matrix somehow lacks a target row, the prediction
    /// map is empty and ranking degrades to "no recommendations" instead of
    /// failing.
    pub fn predict_target(&self, matrix: &RatingMatrix) -> HashMap<ItemId, f64> {
        let Some(target) = matrix.target_row() else {
            debug!("No target row in rating matrix; returning empty predictions");
            return HashMap::new();
        };

        let predicted = self
            .user_features
            .row(target)
            .dot(&self.item_features);

        matrix
            .item_ids()
            .iter()
            .zip(predicted.iter())
            .map(|(item_id, &value)| (item_id.clone(), value))
            .collect()
    }
}

/// Orthonormalize the columns of `m` in place with modified Gram-Schmidt.
///
/// Columns that collapse below the numeric floor (the matrix has lower rank
/// than requested) are zeroed rather than renormalized.
fn orthonormalize(m: &mut Array2<f64>) {
    let k = m.ncols();
    for j in 0..k {
        for i in 0..j {
            let proj = m.column(i).dot(&m.column(j));
            let col_i = m.column(i).to_owned();
            m.column_mut(j).scaled_add(-proj, &col_i);
        }
        let norm = m.column(j).dot(&m.column(j)).sqrt();
        if norm > 1e-12 {
            m.column_mut(j).mapv_inplace(|v| v / norm);
        } else {
            m.column_mut(j).fill(0.0);
        }
    }
}
