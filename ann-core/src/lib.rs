//! # ann-core
//!
//! Core library for `ann` — approximate nearest-neighbor search over
//! HNSW graphs, with a brute-force exact index as a recall oracle.
//!
//! This crate is pure Rust with no mandatory runtime dependencies.
//!
//! ## Core Types
//!
//! ### Indexes
//!
//! - [`BruteForceIndex`] - Exact nearest neighbor search, O(n) per query
//! - [`HnswIndex`] - Approximate nearest neighbor using HNSW graphs
//!
//! ### Types
//!
//! - [`Matrix`] - Owned, dimension-checked row storage
//! - [`VectorId`] - Unique identifier for a stored vector (u32)
//! - [`Metric`] - Supported distance functions
//! - [`HnswConfig`] - HNSW construction parameters

pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod eval;
pub mod index;
pub mod persist;
pub mod vector;

pub use config::{HnswConfig, NeighborSelection};
pub use distance::Metric;
pub use error::{Error, Result};
pub use eval::{mean_recall_at_k, recall_at_k};
pub use index::{BruteForceIndex, HnswIndex, VectorIndex};
pub use vector::{Matrix, VectorId};

/// Re-export commonly used types for convenience.
///
/// # Example
///
/// ```rust
/// use ann_core::prelude::*;
///
/// let mut index = HnswIndex::new(3, Metric::L2, HnswConfig::default()).unwrap();
/// index.add(&[vec![1.0, 2.0, 3.0]]).unwrap();
/// let (distances, ids) = index.search(&[1.0, 2.0, 3.0], 1);
/// assert_eq!(ids[0], 0);
/// ```
pub mod prelude {
    pub use crate::{BruteForceIndex, Error, HnswConfig, HnswIndex, Matrix, Metric, NeighborSelection, Result, VectorId, VectorIndex};
}
