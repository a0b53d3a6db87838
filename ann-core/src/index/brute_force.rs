//! Exact nearest-neighbor search via full distance matrix and argsort.
//!
//! Used both as a standalone index and as the recall oracle HNSW is
//! checked against in tests.

use serde::{Deserialize, Serialize};

use crate::distance::Metric;
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::vector::{Matrix, VectorId};

/// Exact top-k search over every stored vector. O(n) per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BruteForceIndex {
    d: usize,
    metric: Metric,
    vectors: Matrix,
}

impl BruteForceIndex {
    /// Creates an empty index over `d`-dimensional vectors.
    pub fn new(d: usize, metric: Metric) -> Self {
        Self {
            d,
            metric,
            vectors: Matrix::new(d),
        }
    }

    #[inline]
    pub fn d(&self) -> usize {
        self.d
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[inline]
    pub fn ntotal(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.ntotal() > 0
    }

    /// Appends rows of a `n x d` batch.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        for row in vectors {
            if row.len() != self.d {
                return Err(Error::InvalidShape {
                    expected: self.d,
                    got: row.len(),
                });
            }
        }
        for row in vectors {
            self.vectors.push(row);
        }
        Ok(())
    }

    /// Returns the `k` nearest ids and their distances to `query`, sorted
    /// ascending by distance with ties broken by ascending id. Returns
    /// empty vectors if the index is untrained.
    pub fn search(&self, query: &[f32], k: usize) -> (Vec<f32>, Vec<VectorId>) {
        let (mut d, mut i) = self.search_batch(std::slice::from_ref(&query.to_vec()), k);
        (d.pop().unwrap_or_default(), i.pop().unwrap_or_default())
    }

    /// Batched top-k search over `m` query rows.
    pub fn search_batch(
        &self,
        queries: &[Vec<f32>],
        k: usize,
    ) -> (Vec<Vec<f32>>, Vec<Vec<VectorId>>) {
        if !self.is_trained() {
            return (vec![Vec::new(); queries.len()], vec![Vec::new(); queries.len()]);
        }

        let mut all_dists = Vec::with_capacity(queries.len());
        let mut all_ids = Vec::with_capacity(queries.len());

        for q in queries {
            if q.len() != self.d {
                all_dists.push(Vec::new());
                all_ids.push(Vec::new());
                continue;
            }

            let mut scored: Vec<(f32, VectorId)> = self
                .vectors
                .iter()
                .map(|(id, row)| (self.metric.compute_unchecked(q, row), id))
                .collect();

            scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)));
            scored.truncate(k);

            let (d, i): (Vec<f32>, Vec<VectorId>) = scored.into_iter().unzip();
            all_dists.push(d);
            all_ids.push(i);
        }

        (all_dists, all_ids)
    }

    /// Serializes this index to an opaque byte blob.
    pub fn save(&self) -> Result<Vec<u8>> {
        crate::persist::save(self)
    }

    /// Reconstructs an index from a blob written by [`Self::save`].
    pub fn load(bytes: &[u8]) -> Result<Self> {
        crate::persist::load(bytes)
    }
}

impl VectorIndex for BruteForceIndex {
    fn d(&self) -> usize {
        self.d
    }

    fn ntotal(&self) -> usize {
        self.ntotal()
    }

    fn is_trained(&self) -> bool {
        self.is_trained()
    }

    fn add(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        self.add(vectors)
    }

    fn search_batch(&self, queries: &[Vec<f32>], k: usize) -> (Vec<Vec<f32>>, Vec<Vec<u32>>) {
        self.search_batch(queries, k)
    }
}
