//! LRU-K Cache Metrics
//!
//! Metrics specific to the LRU-K promotion tier: admission activity for
//! keys earning residency through repeated touches.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-K-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct LruKCacheMetrics {
    /// Core metrics common to all policies.
    pub core: CoreCacheMetrics,

    /// Candidate keys admitted into the main tier after K touches.
    pub admissions: u64,
}

impl LruKCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate key being admitted into the main tier.
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }
}

impl CacheMetrics for LruKCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("admissions".to_string(), self.admissions as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU-K"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admissions_counter() {
        let mut m = LruKCacheMetrics::new();
        m.record_admission();
        m.record_admission();
        assert_eq!(m.admissions, 2);
        assert_eq!(m.metrics().get("admissions"), Some(&2.0));
    }
}
