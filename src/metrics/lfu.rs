//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) policy: frequency
//! bounds, increment volume and aging activity.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends `CoreCacheMetrics`).
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all policies.
    pub core: CoreCacheMetrics,

    /// Lowest frequency observed among resident entries.
    pub min_frequency: u64,

    /// Highest frequency observed among resident entries.
    pub max_frequency: u64,

    /// Total number of frequency increments (one per hit).
    pub total_frequency_increments: u64,

    /// Number of aging rescales triggered by the average-frequency bound.
    pub aging_rescales: u64,
}

impl LfuCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment and refreshes the frequency bounds.
    pub fn record_frequency_increment(&mut self, new_frequency: u64) {
        self.total_frequency_increments += 1;
        if self.min_frequency == 0 || new_frequency < self.min_frequency {
            self.min_frequency = new_frequency;
        }
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    /// Records one aging rescale pass and resets the frequency bounds,
    /// which are rebuilt by subsequent increments.
    pub fn record_aging_rescale(&mut self) {
        self.aging_rescales += 1;
        self.min_frequency = 0;
        self.max_frequency = 0;
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("aging_rescales".to_string(), self.aging_rescales as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_bounds_track_increments() {
        let mut m = LfuCacheMetrics::new();
        m.record_frequency_increment(2);
        m.record_frequency_increment(5);
        m.record_frequency_increment(3);

        assert_eq!(m.min_frequency, 2);
        assert_eq!(m.max_frequency, 5);
        assert_eq!(m.total_frequency_increments, 3);
    }

    #[test]
    fn test_aging_rescale_resets_bounds() {
        let mut m = LfuCacheMetrics::new();
        m.record_frequency_increment(9);
        m.record_aging_rescale();

        assert_eq!(m.aging_rescales, 1);
        assert_eq!(m.min_frequency, 0);
        assert_eq!(m.max_frequency, 0);
    }
}
