//! Recall evaluation against a ground-truth oracle.

use crate::vector::VectorId;
use std::collections::HashSet;

/// Recall@k for a single query: the fraction of `ground_truth`'s first `k`
/// ids present in `retrieved`'s first `k` ids.
///
/// Returns `0.0` if `k` is `0` or `ground_truth` is empty.
pub fn recall_at_k(retrieved: &[VectorId], ground_truth: &[VectorId], k: usize) -> f64 {
    if k == 0 || ground_truth.is_empty() {
        return 0.0;
    }
    let truth: HashSet<VectorId> = ground_truth.iter().take(k).copied().collect();
    if truth.is_empty() {
        return 0.0;
    }
    let hits = retrieved.iter().take(k).filter(|id| truth.contains(id)).count();
    hits as f64 / truth.len() as f64
}

/// Mean Recall@k across a batch of query results.
pub fn mean_recall_at_k(retrieved: &[Vec<VectorId>], ground_truth: &[Vec<VectorId>], k: usize) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }
    let total: f64 = retrieved
        .iter()
        .zip(ground_truth.iter())
        .map(|(r, g)| recall_at_k(r, g, k))
        .sum();
    total / retrieved.len() as f64
}
