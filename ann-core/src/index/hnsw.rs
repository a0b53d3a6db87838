//! HNSW (Hierarchical Navigable Small World) graph index.
//!
//! Builds a stack of undirected graphs, one per layer, with layer 0 dense
//! and containing every inserted vector and higher layers sparser subsets.
//! Search greedily descends from the top layer to find a good entry point,
//! then runs a bounded beam search at layer 0.
//!
//! # References
//!
//! Malkov & Yashunin (2018): "Efficient and robust approximate nearest
//! neighbor search using Hierarchical Navigable Small World graphs".

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

use crate::config::{HnswConfig, NeighborSelection};
use crate::distance::Metric;
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::vector::{Matrix, VectorId};

/// Fixed default seed so `HnswIndex::new` stays reproducible without
/// forcing every caller to pick one; use [`HnswIndex::with_seed`] for an
/// explicit seed.
const DEFAULT_SEED: u64 = 0x484e_5357_4841_5353;

#[derive(Debug, Clone, Copy)]
struct HeapItem {
    dist: f32,
    id: VectorId,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist && self.id == other.id
    }
}
impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
            .then(self.id.cmp(&other.id))
    }
}

fn sort_ascending(mut v: Vec<(f32, VectorId)>) -> Vec<(f32, VectorId)> {
    v.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));
    v
}

/// A single layer's graph: an adjacency map keyed by id, each entry a list
/// of `(neighbor_id, edge_distance)` pairs. Edge weight is the distance
/// between endpoints at the time the edge was last (re)written, so
/// re-pruning does not need to recompute it from the full vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HnswLayer {
    m_max: usize,
    adjacency: HashMap<VectorId, Vec<(VectorId, f32)>>,
}

impl HnswLayer {
    fn new(m_max: usize) -> Self {
        Self {
            m_max,
            adjacency: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    fn insert_isolated(&mut self, id: VectorId) {
        self.adjacency.entry(id).or_default();
    }

    fn neighbors(&self, id: VectorId) -> &[(VectorId, f32)] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn degree(&self, id: VectorId) -> usize {
        self.neighbors(id).len()
    }

    /// Adds a symmetric edge between `a` and `b`, annotated with the
    /// measured distance. No-op if the edge already exists.
    fn add_edge(&mut self, a: VectorId, b: VectorId, dist: f32) {
        let ea = self.adjacency.entry(a).or_default();
        if !ea.iter().any(|&(n, _)| n == b) {
            ea.push((b, dist));
        }
        let eb = self.adjacency.entry(b).or_default();
        if !eb.iter().any(|&(n, _)| n == a) {
            eb.push((a, dist));
        }
    }

    /// Replaces `id`'s neighbor list, keeping the undirected-edge
    /// invariant: neighbors dropped from the new list lose their reverse
    /// edge to `id`; neighbors newly present gain one.
    fn replace_neighbors(&mut self, id: VectorId, new: Vec<(VectorId, f32)>) {
        let old: Vec<VectorId> = self.neighbors(id).iter().map(|&(n, _)| n).collect();
        let new_ids: HashSet<VectorId> = new.iter().map(|&(n, _)| n).collect();

        for n in &old {
            if !new_ids.contains(n) {
                if let Some(v) = self.adjacency.get_mut(n) {
                    v.retain(|&(nb, _)| nb != id);
                }
            }
        }

        let old_ids: HashSet<VectorId> = old.into_iter().collect();
        for &(n, dist) in &new {
            let entry = self.adjacency.entry(n).or_default();
            if let Some(slot) = entry.iter_mut().find(|(nb, _)| *nb == id) {
                slot.1 = dist;
            } else if !old_ids.contains(&n) {
                entry.push((id, dist));
            }
        }

        self.adjacency.insert(id, new);
    }

    /// Bounded beam search from `entry_points`, returning up to `ef`
    /// `(distance, id)` pairs ascending by distance.
    ///
    /// When `valid` is `Some`, traversal (`visited`/candidates) still
    /// reaches every id reachable in the graph, but the result beam only
    /// ever admits ids present in `valid` — the filtered-search contract.
    fn search_layer(
        &self,
        vectors: &Matrix,
        metric: Metric,
        query: &[f32],
        entry_points: &[VectorId],
        ef: usize,
        valid: Option<&RoaringBitmap>,
    ) -> Vec<(f32, VectorId)> {
        let mut visited: HashSet<VectorId> = HashSet::new();
        let mut candidates: BinaryHeap<Reverse<HeapItem>> = BinaryHeap::new();
        let mut result: BinaryHeap<HeapItem> = BinaryHeap::new();

        let admits = |id: VectorId| valid.map_or(true, |v| v.contains(id));

        for &ep in entry_points {
            if visited.insert(ep) {
                let Some(row) = vectors.row(ep) else { continue };
                let dist = metric.compute_unchecked(query, row);
                candidates.push(Reverse(HeapItem { dist, id: ep }));
                if admits(ep) {
                    result.push(HeapItem { dist, id: ep });
                }
            }
        }

        while let Some(Reverse(c)) = candidates.pop() {
            if let Some(f) = result.peek() {
                if c.dist > f.dist {
                    break;
                }
            }

            for &(e, _) in self.neighbors(c.id) {
                if !visited.insert(e) {
                    continue;
                }
                let Some(row) = vectors.row(e) else { continue };
                let d_e = metric.compute_unchecked(query, row);

                let admit = match result.peek() {
                    Some(f) => d_e < f.dist || result.len() < ef,
                    None => true,
                };

                if admit {
                    candidates.push(Reverse(HeapItem { dist: d_e, id: e }));
                    if admits(e) {
                        result.push(HeapItem { dist: d_e, id: e });
                        if result.len() > ef {
                            result.pop();
                        }
                    }
                }
            }
        }

        sort_ascending(result.into_iter().map(|h| (h.dist, h.id)).collect())
    }

    /// Heuristic neighbor selector: admits a candidate only if it is
    /// closer to the query than to every already-admitted neighbor,
    /// favoring spread over raw proximity. Better for clustered data than
    /// [`select_neighbors_simple`].
    #[allow(clippy::too_many_arguments)]
    fn select_neighbors_heuristic(
        &self,
        vectors: &Matrix,
        metric: Metric,
        query: &[f32],
        mut candidates: Vec<(f32, VectorId)>,
        m: usize,
        extend_candidates: bool,
        keep_pruned_connections: bool,
    ) -> Vec<(f32, VectorId)> {
        if extend_candidates {
            let mut seen: HashSet<VectorId> = candidates.iter().map(|&(_, id)| id).collect();
            let extra: Vec<VectorId> = candidates
                .iter()
                .flat_map(|&(_, id)| self.neighbors(id).iter().map(|&(n, _)| n))
                .filter(|n| seen.insert(*n))
                .collect();
            for n in extra {
                if let Some(row) = vectors.row(n) {
                    candidates.push((metric.compute_unchecked(query, row), n));
                }
            }
        }

        let candidates = sort_ascending(candidates);

        let mut r: Vec<(f32, VectorId)> = Vec::new();
        let mut w_d: Vec<(f32, VectorId)> = Vec::new();

        for (d_e, e) in candidates {
            if r.len() >= m {
                break;
            }
            let Some(e_row) = vectors.row(e) else { continue };

            let admit = r.is_empty()
                || r.iter().all(|&(_, n)| {
                    let n_row = vectors.row(n).unwrap();
                    d_e < metric.compute_unchecked(e_row, n_row)
                });

            if admit {
                r.push((d_e, e));
            } else {
                w_d.push((d_e, e));
            }
        }

        if keep_pruned_connections && r.len() < m {
            let w_d = sort_ascending(w_d);
            r.extend(w_d.into_iter().take(m - r.len()));
        }

        let mut r = sort_ascending(r);
        r.truncate(m);
        r
    }
}

fn select_neighbors_simple(candidates: Vec<(f32, VectorId)>, m: usize) -> Vec<(f32, VectorId)> {
    let mut sorted = sort_ascending(candidates);
    sorted.truncate(m);
    sorted
}

/// Approximate nearest-neighbor index backed by a stack of HNSW layers.
#[derive(Debug, Clone)]
pub struct HnswIndex {
    d: usize,
    metric: Metric,
    config: HnswConfig,
    vectors: Matrix,
    layers: Vec<HnswLayer>,
    ep: Option<VectorId>,
    l_max: usize,
    seed: u64,
    rng: StdRng,
}

/// The serializable subset of [`HnswIndex`] state used by `save`/`load`.
/// The RNG's live state is not preserved, only the seed it was
/// constructed with — loaded indexes answer identical queries
/// bit-identically, but a fresh insert after loading draws from a
/// freshly-seeded RNG rather than resuming the exact prior draw sequence.
#[derive(Debug, Serialize, Deserialize)]
struct HnswSnapshot {
    d: usize,
    metric: Metric,
    config: HnswConfig,
    vectors: Matrix,
    layers: Vec<HnswLayer>,
    ep: Option<VectorId>,
    l_max: usize,
    seed: u64,
}

impl HnswIndex {
    /// Creates an empty index, seeded deterministically from a fixed
    /// constant. Use [`Self::with_seed`] for an explicit seed.
    pub fn new(d: usize, metric: Metric, config: HnswConfig) -> Result<Self> {
        Self::with_seed(d, metric, config, DEFAULT_SEED)
    }

    /// Creates an empty index with an explicit RNG seed for the level
    /// assignment draws, making two builds over the same insertion order
    /// reproduce identical graphs.
    pub fn with_seed(d: usize, metric: Metric, config: HnswConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            d,
            metric,
            config,
            vectors: Matrix::new(d),
            layers: Vec::new(),
            ep: None,
            l_max: 0,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
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

    fn assign_level(&mut self) -> usize {
        let u: f64 = self.rng.gen();
        let u = u.max(f64::MIN_POSITIVE);
        (-u.ln() * self.config.m_l).floor() as usize
    }

    fn select_neighbors(
        &self,
        layer_idx: usize,
        query: &[f32],
        candidates: Vec<(f32, VectorId)>,
        m: usize,
    ) -> Vec<(f32, VectorId)> {
        match self.config.neighbors {
            NeighborSelection::Simple => select_neighbors_simple(candidates, m),
            NeighborSelection::Heuristic => self.layers[layer_idx].select_neighbors_heuristic(
                &self.vectors,
                self.metric,
                query,
                candidates,
                m,
                self.config.extend_candidates,
                self.config.keep_pruned_connections,
            ),
        }
    }

    fn insert_one(&mut self, v: &[f32]) -> VectorId {
        let id = self.vectors.push(v);
        let level = self.assign_level();

        while self.layers.len() <= level {
            let l = self.layers.len();
            let cap = if l == 0 { self.config.m_max0 } else { self.config.m_max };
            self.layers.push(HnswLayer::new(cap));
        }

        let Some(entry) = self.ep else {
            for layer in self.layers.iter_mut().take(level + 1) {
                layer.insert_isolated(id);
            }
            self.ep = Some(id);
            self.l_max = level;
            return id;
        };

        let l_max = self.l_max;
        let mut ep = entry;

        for layer_idx in (level + 1..=l_max).rev() {
            let nearest = self.layers[layer_idx].search_layer(&self.vectors, self.metric, v, &[ep], 1, None);
            if let Some(&(_, n)) = nearest.first() {
                ep = n;
            }
        }

        let mut ep_set = vec![ep];
        for layer_idx in (0..=level.min(l_max)).rev() {
            if self.layers[layer_idx].is_empty() {
                self.layers[layer_idx].insert_isolated(id);
                ep_set = vec![id];
                continue;
            }

            let candidates =
                self.layers[layer_idx].search_layer(&self.vectors, self.metric, v, &ep_set, self.config.ef_construction, None);
            let selected = self.select_neighbors(layer_idx, v, candidates.clone(), self.config.m);

            self.layers[layer_idx].insert_isolated(id);
            for &(dist, n) in &selected {
                self.layers[layer_idx].add_edge(id, n, dist);
            }

            let cap = self.layers[layer_idx].m_max;
            for &(_, n) in &selected {
                if self.layers[layer_idx].degree(n) > cap {
                    let n_row = self.vectors.row(n).unwrap().to_vec();
                    let n_candidates: Vec<(f32, VectorId)> = self.layers[layer_idx]
                        .neighbors(n)
                        .iter()
                        .map(|&(nb, _)| {
                            let nb_row = self.vectors.row(nb).unwrap();
                            (self.metric.compute_unchecked(&n_row, nb_row), nb)
                        })
                        .collect();
                    let new_neighbors = self.select_neighbors(layer_idx, &n_row, n_candidates, cap);
                    self.layers[layer_idx].replace_neighbors(n, new_neighbors);
                }
            }

            ep_set = if candidates.is_empty() {
                vec![id]
            } else {
                candidates.iter().map(|&(_, cid)| cid).collect()
            };
        }

        if level > l_max {
            tracing::debug!(new_ep = id, old_level = l_max, new_level = level, "entry point promoted");
            for layer in self.layers.iter_mut().take(level + 1).skip(l_max + 1) {
                layer.insert_isolated(id);
            }
            self.ep = Some(id);
            self.l_max = level;
        }

        id
    }

    /// Appends rows of a `n x d` batch. Fails with
    /// [`Error::InvalidShape`] without mutating the index if any row's
    /// width does not match `d`.
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
            self.insert_one(row);
        }
        Ok(())
    }

    fn search_internal(&self, query: &[f32], k: usize, valid: Option<&RoaringBitmap>) -> (Vec<f32>, Vec<VectorId>) {
        if !self.is_trained() || query.len() != self.d {
            return (Vec::new(), Vec::new());
        }

        let mut ep = self.ep.unwrap();
        for layer_idx in (1..=self.l_max).rev() {
            let nearest = self.layers[layer_idx].search_layer(&self.vectors, self.metric, query, &[ep], 1, None);
            if let Some(&(_, n)) = nearest.first() {
                ep = n;
            }
        }

        let ef = self.config.ef_search.max(k);
        let mut beam = self.layers[0].search_layer(&self.vectors, self.metric, query, &[ep], ef, valid);
        beam.truncate(k);
        beam.into_iter().unzip()
    }

    /// Searches for the `k` nearest neighbors of `query`.
    pub fn search(&self, query: &[f32], k: usize) -> (Vec<f32>, Vec<VectorId>) {
        self.search_internal(query, k, None)
    }

    /// Searches for the `k` nearest neighbors of `query` among ids present
    /// in `valid`. Behaves identically to [`Self::search`] when every id
    /// is in `valid`.
    pub fn search_filtered(&self, query: &[f32], k: usize, valid: &RoaringBitmap) -> (Vec<f32>, Vec<VectorId>) {
        self.search_internal(query, k, Some(valid))
    }

    /// Batched search over `m` query rows.
    pub fn search_batch(&self, queries: &[Vec<f32>], k: usize) -> (Vec<Vec<f32>>, Vec<Vec<VectorId>>) {
        let mut all_d = Vec::with_capacity(queries.len());
        let mut all_i = Vec::with_capacity(queries.len());
        for q in queries {
            let (d, i) = self.search(q, k);
            all_d.push(d);
            all_i.push(i);
        }
        (all_d, all_i)
    }

    /// Serializes this index to an opaque byte blob. The RNG's live
    /// position is not preserved — only its original seed.
    pub fn save(&self) -> Result<Vec<u8>> {
        let snapshot = HnswSnapshot {
            d: self.d,
            metric: self.metric,
            config: self.config,
            vectors: self.vectors.clone(),
            layers: self.layers.clone(),
            ep: self.ep,
            l_max: self.l_max,
            seed: self.seed,
        };
        crate::persist::save(&snapshot)
    }

    /// Reconstructs an index from a blob written by [`Self::save`].
    /// Subsequent searches against the loaded index are bit-identical to
    /// the saved instance for the same query.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let snapshot: HnswSnapshot = crate::persist::load(bytes)?;
        Ok(Self {
            d: snapshot.d,
            metric: snapshot.metric,
            config: snapshot.config,
            vectors: snapshot.vectors,
            layers: snapshot.layers,
            ep: snapshot.ep,
            l_max: snapshot.l_max,
            seed: snapshot.seed,
            rng: StdRng::seed_from_u64(snapshot.seed),
        })
    }

    /// Checks graph invariants: every layer's vertex set is a subset of
    /// the layer below, every degree is within its cap, and every edge is
    /// mirrored. Exposed (rather than gated behind `#[cfg(test)]`) so
    /// integration tests in `tests/` can assert it too; panics on the
    /// first violation found.
    pub fn check_invariants(&self) {
        for layer_idx in 0..self.layers.len() {
            let cap = self.layers[layer_idx].m_max;
            for (&id, neighbors) in &self.layers[layer_idx].adjacency {
                assert!(neighbors.len() <= cap, "layer {layer_idx} node {id} exceeds cap");
                for &(n, _) in neighbors {
                    assert!(
                        self.layers[layer_idx].neighbors(n).iter().any(|&(back, _)| back == id),
                        "layer {layer_idx} edge {id}-{n} not mirrored"
                    );
                }
                if layer_idx > 0 {
                    assert!(
                        self.layers[layer_idx - 1].adjacency.contains_key(&id),
                        "layer {layer_idx} node {id} missing from layer below"
                    );
                }
            }
        }
    }
}

impl VectorIndex for HnswIndex {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HnswConfig;

    fn small_config() -> HnswConfig {
        HnswConfig {
            m: 3,
            m_max: 3,
            m_max0: 6,
            m_l: 1.0 / (3_f64).ln(),
            ef_construction: 32,
            ef_search: 32,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_index_is_untrained() {
        let index = HnswIndex::new(3, Metric::Cosine, HnswConfig::default()).unwrap();
        assert!(!index.is_trained());
        assert_eq!(index.ntotal(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = HnswConfig::default();
        cfg.m = 0;
        assert!(HnswIndex::new(3, Metric::Cosine, cfg).is_err());
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let mut index = HnswIndex::new(3, Metric::L2, small_config()).unwrap();
        let result = index.add(&[vec![1.0, 2.0]]);
        assert!(matches!(result, Err(Error::InvalidShape { expected: 3, got: 2 })));
    }

    #[test]
    fn test_search_untrained_returns_empty() {
        let index = HnswIndex::new(3, Metric::L2, small_config()).unwrap();
        let (d, i) = index.search(&[1.0, 0.0, 0.0], 5);
        assert!(d.is_empty() && i.is_empty());
    }

    #[test]
    fn test_scenario_2_exact_recovery_on_tiny_graph() {
        // Scenario 2: d=2, M=3, ef_construction=32, 10 random 2D vectors;
        // searching for v_i with k=1 returns id i.
        let config = HnswConfig {
            m: 3,
            m_max: 3,
            m_max0: 6,
            m_l: 1.0 / (3_f64).ln(),
            ef_construction: 32,
            ef_search: 32,
            ..Default::default()
        };
        let mut index = HnswIndex::with_seed(2, Metric::L2, config, 42).unwrap();
        let vectors: Vec<Vec<f32>> = (0..10)
            .map(|i| vec![(i as f32).sin() * 10.0, (i as f32).cos() * 10.0])
            .collect();
        index.add(&vectors).unwrap();

        for (i, v) in vectors.iter().enumerate() {
            let (d, ids) = index.search(v, 1);
            assert_eq!(ids[0], i as VectorId, "query {i} returned {:?}", ids);
            assert!(d[0] < 1e-5);
        }
    }

    #[test]
    fn test_layer_invariants_after_many_inserts() {
        let mut index = HnswIndex::with_seed(4, Metric::L2, HnswConfig::default(), 7).unwrap();
        let vectors: Vec<Vec<f32>> = (0..300)
            .map(|i| vec![(i as f32).sin(), (i as f32).cos(), i as f32 % 7.0, i as f32 % 3.0])
            .collect();
        index.add(&vectors).unwrap();
        index.check_invariants();
    }

    #[test]
    fn test_determinism_same_seed_same_order() {
        let config = small_config();
        let vectors: Vec<Vec<f32>> = (0..50).map(|i| vec![(i as f32) * 0.37, (i as f32) * 1.7, (i as f32)]).collect();

        let mut a = HnswIndex::with_seed(3, Metric::L2, config, 99).unwrap();
        a.add(&vectors).unwrap();
        let mut b = HnswIndex::with_seed(3, Metric::L2, config, 99).unwrap();
        b.add(&vectors).unwrap();

        let q = vec![1.0, 2.0, 3.0];
        assert_eq!(a.search(&q, 5), b.search(&q, 5));
    }

    #[test]
    fn test_scenario_4_filtered_excludes_self() {
        let config = small_config();
        let mut index = HnswIndex::with_seed(2, Metric::L2, config, 3).unwrap();
        let vectors: Vec<Vec<f32>> = (0..10)
            .map(|i| vec![(i as f32).sin() * 5.0, (i as f32).cos() * 5.0])
            .collect();
        index.add(&vectors).unwrap();

        for i in 0..10u32 {
            let mut valid = RoaringBitmap::new();
            for id in 0..10u32 {
                if id != i {
                    valid.insert(id);
                }
            }
            let (_, ids) = index.search_filtered(&vectors[i as usize], 1, &valid);
            assert_eq!(ids.len(), 1);
            assert_ne!(ids[0], i);
        }
    }

    #[test]
    fn test_filter_with_all_ids_matches_unfiltered() {
        let config = small_config();
        let mut index = HnswIndex::with_seed(2, Metric::L2, config, 11).unwrap();
        let vectors: Vec<Vec<f32>> = (0..20).map(|i| vec![i as f32, (i * 2) as f32]).collect();
        index.add(&vectors).unwrap();

        let mut all_valid = RoaringBitmap::new();
        all_valid.insert_range(0..20);

        let q = vec![5.0, 10.0];
        assert_eq!(index.search(&q, 5), index.search_filtered(&q, 5, &all_valid));
    }

    #[test]
    fn test_save_load_roundtrip_bit_identical() {
        let mut index = HnswIndex::with_seed(4, Metric::Cosine, HnswConfig::default(), 5).unwrap();
        let vectors: Vec<Vec<f32>> = (0..100).map(|i| vec![(i as f32).sin(), (i as f32).cos(), i as f32, -(i as f32)]).collect();
        index.add(&vectors).unwrap();

        let bytes = index.save().unwrap();
        let loaded = HnswIndex::load(&bytes).unwrap();

        for i in 0..20 {
            let q = vec![i as f32 * 0.3, (i as f32).cos(), i as f32 * 0.1, -(i as f32 * 0.2)];
            assert_eq!(index.search(&q, 5), loaded.search(&q, 5));
        }
    }

    #[test]
    fn test_recall_vs_brute_force_simple_selector() {
        let config = HnswConfig {
            m: 16,
            m_max: 16,
            m_max0: 32,
            m_l: 1.0 / (16_f64).ln(),
            ef_construction: 200,
            ef_search: 100,
            ..Default::default()
        };
        let mut index = HnswIndex::with_seed(8, Metric::L2, config, 1337).unwrap();

        let vectors: Vec<Vec<f32>> = (0..200)
            .map(|i| (0..8).map(|j| ((i * 8 + j) as f32).sin()).collect())
            .collect();
        index.add(&vectors).unwrap();

        let k = 10;
        let mut total_recall = 0.0;
        let num_queries = 10;

        for q in 0..num_queries {
            let query: Vec<f32> = (0..8).map(|j| ((q * 7 + j) as f32).cos()).collect();

            let (_, hnsw_ids) = index.search(&query, k);
            let hnsw_set: HashSet<_> = hnsw_ids.into_iter().collect();

            let mut distances: Vec<(VectorId, f32)> = vectors
                .iter()
                .enumerate()
                .map(|(id, v)| (id as VectorId, index.metric.compute_unchecked(&query, v)))
                .collect();
            distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
            let bf_set: HashSet<_> = distances.iter().take(k).map(|(id, _)| *id).collect();

            total_recall += hnsw_set.intersection(&bf_set).count() as f64 / k as f64;
        }

        let avg_recall = total_recall / num_queries as f64;
        assert!(avg_recall >= 0.7, "average recall {avg_recall:.2} below 0.7");
    }

    #[test]
    fn test_heuristic_selector_builds_valid_graph() {
        let config = HnswConfig {
            m: 6,
            m_max: 6,
            m_max0: 12,
            m_l: 1.0 / (6_f64).ln(),
            ef_construction: 64,
            ef_search: 32,
            neighbors: NeighborSelection::Heuristic,
            extend_candidates: true,
            keep_pruned_connections: true,
        };
        let mut index = HnswIndex::with_seed(4, Metric::Cosine, config, 21).unwrap();
        let vectors: Vec<Vec<f32>> = (0..150)
            .map(|i| vec![(i as f32).sin(), (i as f32).cos(), i as f32 % 5.0, i as f32 % 2.0])
            .collect();
        index.add(&vectors).unwrap();
        index.check_invariants();

        let (_, ids) = index.search(&vectors[0], 1);
        assert!(!ids.is_empty());
    }
}
