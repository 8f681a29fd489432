//! ARC Cache Metrics
//!
//! Metrics specific to the Adaptive Replacement Cache: ghost-list activity,
//! capacity transfers between the two sub-parts and hot promotions.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// ARC-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct ArcCacheMetrics {
    /// Core metrics common to all policies.
    pub core: CoreCacheMetrics,

    /// Hits on the recency sub-part's ghost list.
    pub recency_ghost_hits: u64,

    /// Hits on the frequency sub-part's ghost list.
    pub frequency_ghost_hits: u64,

    /// Capacity slots actually transferred between the sub-parts.
    pub capacity_transfers: u64,

    /// Entries promoted into the frequency sub-part after reaching the
    /// transform threshold.
    pub hot_promotions: u64,
}

impl ArcCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit on the recency sub-part's ghost list.
    pub fn record_recency_ghost_hit(&mut self) {
        self.recency_ghost_hits += 1;
    }

    /// Records a hit on the frequency sub-part's ghost list.
    pub fn record_frequency_ghost_hit(&mut self) {
        self.frequency_ghost_hits += 1;
    }

    /// Records one capacity slot moving from one sub-part to the other.
    pub fn record_capacity_transfer(&mut self) {
        self.capacity_transfers += 1;
    }

    /// Records an entry reaching the transform threshold.
    pub fn record_hot_promotion(&mut self) {
        self.hot_promotions += 1;
    }
}

impl CacheMetrics for ArcCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert(
            "capacity_transfers".to_string(),
            self.capacity_transfers as f64,
        );
        metrics.insert(
            "frequency_ghost_hits".to_string(),
            self.frequency_ghost_hits as f64,
        );
        metrics.insert("hot_promotions".to_string(), self.hot_promotions as f64);
        metrics.insert(
            "recency_ghost_hits".to_string(),
            self.recency_ghost_hits as f64,
        );
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}
