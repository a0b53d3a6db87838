//! HNSW construction parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Neighbor selection strategy used when pruning a node's adjacency down
/// to its degree cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborSelection {
    /// Keep the `M` smallest-distance candidates.
    Simple,
    /// Prefer candidates that are closer to the query than to any already
    /// admitted neighbor — better for clustered data.
    Heuristic,
}

impl Default for NeighborSelection {
    fn default() -> Self {
        Self::Simple
    }
}

/// Immutable HNSW construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HnswConfig {
    /// Target out-degree per node for layers >= 1.
    pub m: usize,
    /// Hard cap on out-degree for layers >= 1.
    pub m_max: usize,
    /// Hard cap on out-degree for layer 0 (typically `2 * m`).
    pub m_max0: usize,
    /// Level-assignment scale factor; by convention `1 / ln(m)`.
    pub m_l: f64,
    /// Beam width during insertion.
    pub ef_construction: usize,
    /// Beam width during query at layer 0.
    pub ef_search: usize,
    /// Neighbor selector mode.
    pub neighbors: NeighborSelection,
    /// Heuristic option: widen the candidate pool with neighbors-of-neighbors.
    pub extend_candidates: bool,
    /// Heuristic option: backfill the result with rejected candidates
    /// until `M` is reached.
    pub keep_pruned_connections: bool,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            m: 16,
            m_max: 16,
            m_max0: 32,
            m_l: 1.0 / (16_f64).ln(),
            ef_construction: 32,
            ef_search: 32,
            neighbors: NeighborSelection::Simple,
            extend_candidates: false,
            keep_pruned_connections: true,
        }
    }
}

impl HnswConfig {
    /// Validates construction parameters, matching the failure semantics
    /// in the spec's error handling design: `M < 2`, `ef_construction < M`,
    /// or `m_L <= 0` fail with [`Error::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        if self.m < 2 {
            return Err(Error::InvalidConfig(format!("M must be >= 2, got {}", self.m)));
        }
        if self.ef_construction < self.m {
            return Err(Error::InvalidConfig(format!(
                "ef_construction ({}) must be >= M ({})",
                self.ef_construction, self.m
            )));
        }
        if self.m_l <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "m_L must be > 0, got {}",
                self.m_l
            )));
        }
        if self.m_max == 0 || self.m_max0 == 0 {
            return Err(Error::InvalidConfig(
                "M_max and M_max0 must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HnswConfig::default().validate().is_ok());
    }

    #[test]
    fn test_m_too_small_rejected() {
        let mut cfg = HnswConfig::default();
        cfg.m = 1;
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_ef_construction_below_m_rejected() {
        let mut cfg = HnswConfig::default();
        cfg.ef_construction = 4;
        cfg.m = 16;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_non_positive_m_l_rejected() {
        let mut cfg = HnswConfig::default();
        cfg.m_l = 0.0;
        assert!(cfg.validate().is_err());
    }
}
