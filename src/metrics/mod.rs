//! Cache Metrics System
//!
//! Provides a flexible metrics system for the eviction policies using
//! BTreeMap-based metrics reporting. Each policy tracks its own specific
//! counters while implementing a common `CacheMetrics` trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for comparing policy behavior
//!   across runs
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference (O(log n) vs O(1)) is negligible with a
//! handful of metric keys, but the deterministic behavior is invaluable
//! when comparing hit rates across policies.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod arc;
pub mod lfu;
pub mod lru_k;

pub use arc::ArcCacheMetrics;
pub use lfu::LfuCacheMetrics;
pub use lru_k::LruKCacheMetrics;

/// Common metrics tracked by every eviction policy.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache.
    pub requests: u64,

    /// Number of lookups that found a resident entry.
    pub cache_hits: u64,

    /// Number of entries evicted due to capacity pressure.
    pub evictions: u64,

    /// Number of entries inserted (new keys, not overwrites).
    pub insertions: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found a resident entry.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that found nothing.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction forced by capacity pressure.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records the insertion of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before any lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the core counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics
    }
}

/// Common interface for reading a policy's metrics.
pub trait CacheMetrics {
    /// Returns all metrics as name → value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Returns the short, human-readable policy name.
    fn algorithm_name(&self) -> &'static str;
}

/// LRU-specific metrics.
///
/// Plain LRU has no policy-specific counters beyond the core set; this
/// wrapper exists so every policy exposes a concrete metrics type.
#[derive(Debug, Default, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all policies.
    pub core: CoreCacheMetrics,
}

impl LruCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_counters() {
        let mut m = CoreCacheMetrics::new();
        m.record_hit();
        m.record_hit();
        m.record_miss();
        m.record_insertion();
        m.record_eviction();

        assert_eq!(m.requests, 3);
        assert_eq!(m.cache_hits, 2);
        assert_eq!(m.evictions, 1);
        assert_eq!(m.insertions, 1);
        assert!((m.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert!((m.miss_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_are_zero_without_requests() {
        let m = CoreCacheMetrics::new();
        assert_eq!(m.hit_rate(), 0.0);
        assert_eq!(m.miss_rate(), 0.0);
    }

    #[test]
    fn test_btreemap_keys_are_sorted() {
        let m = CoreCacheMetrics::new();
        let map = m.to_btreemap();
        let keys: alloc::vec::Vec<_> = map.keys().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
