//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Choosing `max_average_frequency`
//!
//! The LFU engine tracks a running total of all resident frequencies. When
//! the average frequency per resident entry exceeds
//! `max_average_frequency`, every frequency is rescaled downward (aging).
//! A small threshold ages aggressively and favours newly warm keys; a large
//! threshold preserves long-term popularity longer. Values in the
//! thousands-to-millions range are typical for long-running caches.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LfuCacheConfig;
//! use evict_rs::LfuCache;
//! use core::num::{NonZeroU64, NonZeroUsize};
//!
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     max_average_frequency: NonZeroU64::new(1_000_000).unwrap(),
//! };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! ```

use core::fmt;
use core::num::{NonZeroU64, NonZeroUsize};

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU tracks per-entry access frequency and evicts the least frequently
/// used entry when the cache reaches capacity, breaking frequency ties in
/// insertion order (FIFO).
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold.
/// - `max_average_frequency`: Aging threshold. When the mean resident
///   frequency exceeds this value, all frequencies rescale to
///   `max(1, f - threshold / 2)`, which prevents long-lived hot keys from
///   permanently starving newly useful cold keys.
#[derive(Clone, Copy)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
    /// Maximum allowed average frequency before an aging rescale runs.
    pub max_average_frequency: NonZeroU64,
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .field("max_average_frequency", &self.max_average_frequency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
            max_average_frequency: NonZeroU64::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 100);
        assert_eq!(config.max_average_frequency.get(), 1000);
    }
}
