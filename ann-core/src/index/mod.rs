//! Index types sharing a common `(add, search, save, load, ntotal,
//! is_trained, d)` capability set.

pub mod brute_force;
pub mod hnsw;

pub use brute_force::BruteForceIndex;
pub use hnsw::HnswIndex;

use crate::error::Result;

/// Shared capability set across index kinds.
///
/// Expressed as a trait rather than an inheritance chain: brute-force,
/// HNSW, and filtered HNSW search all vary in how they traverse or score
/// candidates, not in what they expose to a caller. Anything a specific
/// index needs beyond this (e.g. `search_filtered`'s extra allow-list
/// parameter) lives as an inherent method on that type instead of being
/// forced into the shared trait.
pub trait VectorIndex {
    /// Vector dimension this index was constructed with.
    fn d(&self) -> usize;

    /// Number of vectors added so far.
    fn ntotal(&self) -> usize;

    /// Whether at least one vector has been added.
    fn is_trained(&self) -> bool;

    /// Appends rows of a `n x d` batch. Fails with
    /// [`crate::error::Error::InvalidShape`] if any row's width does not
    /// match `d()`.
    fn add(&mut self, vectors: &[Vec<f32>]) -> Result<()>;

    /// Batched top-k search: one `(distances, ids)` pair per query row, in
    /// query order. Each pair has length `k` on a trained index, or
    /// length 0 on an untrained one — never an error.
    fn search_batch(&self, queries: &[Vec<f32>], k: usize) -> (Vec<Vec<f32>>, Vec<Vec<u32>>);
}
