//! # ann
//!
//! **Approximate nearest-neighbor vector search, embedded in-process.**
//!
//! `ann` provides fast similarity search over dense vectors, useful for:
//!
//! - **RAG applications** — semantic retrieval over embedded documents
//! - **Semantic search** — find similar documents, images, or audio
//! - **Recommendations** — content-based filtering with embeddings
//!
//! ## Quick Start
//!
//! ### In-Memory Exact Index
//!
//! For small datasets or as a recall baseline:
//!
//! ```rust
//! use ann::prelude::*;
//!
//! let mut index = BruteForceIndex::new(384, Metric::Cosine);
//!
//! let embedding = vec![0.1; 384];
//! index.add(&[embedding.clone()]).unwrap();
//!
//! let (distances, ids) = index.search(&embedding, 10);
//! assert!(!ids.is_empty());
//! ```
//!
//! ### HNSW for Large Datasets
//!
//! For millions of vectors with sub-linear approximate search:
//!
//! ```rust
//! use ann::prelude::*;
//!
//! let config = HnswConfig {
//!     m: 16,                 // connections per node (higher = better recall)
//!     m_max0: 32,            // layer-0 connection cap
//!     ef_construction: 100,  // build-time beam width
//!     ef_search: 50,         // search-time beam width
//!     ..Default::default()
//! };
//!
//! let mut index = HnswIndex::new(128, Metric::Cosine, config).unwrap();
//!
//! let vectors: Vec<Vec<f32>> = (0..1000)
//!     .map(|i| (0..128).map(|j| ((i * 128 + j) as f32).sin()).collect())
//!     .collect();
//! index.add(&vectors).unwrap();
//!
//! let query: Vec<f32> = (0..128).map(|j| (j as f32).cos()).collect();
//! let (_, ids) = index.search(&query, 10);
//! assert_eq!(ids.len(), 10);
//! ```
//!
//! ### Filtered Search
//!
//! Restrict results to a caller-supplied allow-list of ids — useful for
//! combining vector similarity with metadata conditions tracked elsewhere:
//!
//! ```rust
//! use ann::prelude::*;
//! use roaring::RoaringBitmap;
//!
//! let mut index = HnswIndex::new(3, Metric::Cosine, HnswConfig::default()).unwrap();
//! index
//!     .add(&[vec![1.0, 0.0, 0.0], vec![0.9, 0.1, 0.0], vec![0.8, 0.2, 0.0]])
//!     .unwrap();
//!
//! // Only ids 0 and 2 are eligible results.
//! let mut allowed = RoaringBitmap::new();
//! allowed.insert(0);
//! allowed.insert(2);
//!
//! let (_, ids) = index.search_filtered(&[1.0, 0.0, 0.0], 10, &allowed);
//! assert!(ids.iter().all(|id| *id == 0 || *id == 2));
//! ```
//!
//! ## Architecture
//!
//! `ann` is organized into two crates:
//!
//! - **`ann-core`** — the index implementations, with no optional features
//! - **`ann`** — this crate, which re-exports `ann-core`'s public API
//!
//! ### Core Components
//!
//! - [`BruteForceIndex`] — exact nearest neighbor search (O(n) per query)
//! - [`HnswIndex`] — approximate nearest neighbor search over an HNSW graph
//! - [`Metric`] — distance functions (cosine, L2, inner product)
//! - [`HnswConfig`] — HNSW construction parameters
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`](crate::Result), which uses
//! the [`Error`] enum for error types. Search on an untrained index or with
//! a mismatched query shape returns empty results rather than an error.
//!
//! ## Thread Safety
//!
//! [`BruteForceIndex`] and [`HnswIndex`] are not internally synchronized;
//! wrap one in a `Mutex` or `RwLock` to share it across threads.

// Re-export everything from core.
pub use ann_core::*;
