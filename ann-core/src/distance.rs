//! Distance metrics for vector similarity computations.
//!
//! All three metrics are normalized so that a smaller value always means
//! "closer" — inner product distance is `1 - dot(a, b)` for this reason.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vector::Matrix;

/// Supported distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Cosine distance (1 - cosine similarity). Lower is more similar.
    Cosine,
    /// Euclidean distance (L2 norm). Lower is more similar.
    L2,
    /// Inner-product distance (`1 - a . b`). Lower is more similar.
    InnerProduct,
}

impl Default for Metric {
    fn default() -> Self {
        Self::Cosine
    }
}

impl Metric {
    /// Computes the distance between `a` and `b`.
    ///
    /// Returns [`Error::InvalidShape`] if the two slices have different
    /// lengths.
    #[inline]
    pub fn compute(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(Error::InvalidShape {
                expected: a.len(),
                got: b.len(),
            });
        }
        Ok(self.compute_unchecked(a, b))
    }

    /// Computes the distance without validating shapes. Callers must
    /// already know `a.len() == b.len()`; used on the hot path inside the
    /// graph search where shapes were validated once at insertion time.
    #[inline]
    pub fn compute_unchecked(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Metric::Cosine => cosine_distance(a, b),
            Metric::L2 => l2_distance(a, b),
            Metric::InnerProduct => 1.0 - dot_product(a, b),
        }
    }
}

/// Euclidean (L2) distance: `sqrt(sum((a[i] - b[i])^2))`.
#[inline]
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    l2_distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance, avoiding the `sqrt` for ranking comparisons.
#[inline]
pub fn l2_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Cosine distance: `1 - (a . b) / (||a|| * ||b||)`.
///
/// Range `[0, 2]`: 0 for identical direction, 2 for opposite direction.
/// A zero-norm input is treated as maximally dissimilar from everything.
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot_product(a, b);
    let norm_a = crate::vector::norm(a);
    let norm_b = crate::vector::norm(b);

    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return 1.0;
    }

    1.0 - (dot / denom)
}

/// Dot product (inner product): `sum(a[i] * b[i])`.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Computes the full pairwise distance matrix between every query row and
/// every base row, returning one `Vec<f32>` of length `base.len()` per
/// query, in query order.
///
/// Returns [`Error::InvalidShape`] if `queries.dim() != base.dim()`.
pub fn distance_matrix(metric: Metric, queries: &Matrix, base: &Matrix) -> Result<Vec<Vec<f32>>> {
    if queries.dim() != base.dim() {
        return Err(Error::InvalidShape {
            expected: base.dim(),
            got: queries.dim(),
        });
    }
    Ok(queries
        .iter()
        .map(|(_, q)| {
            base.iter()
                .map(|(_, row)| metric.compute_unchecked(q, row))
                .collect()
        })
        .collect())
}
