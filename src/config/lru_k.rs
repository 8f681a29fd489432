//! Configuration for the LRU-K promotion-tier cache.
//!
//! LRU-K keeps a main LRU tier plus a bounded history of access counts for
//! keys that have not yet earned residency. A key is admitted into the main
//! tier only once it has been touched `promotion_threshold` times, so a
//! one-off scan cannot displace hot data.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LruKCacheConfig;
//! use evict_rs::LruKCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruKCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     history_capacity: NonZeroUsize::new(200).unwrap(),
//!     promotion_threshold: NonZeroUsize::new(2).unwrap(),
//! };
//! let cache: LruKCache<String, i32> = LruKCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU-K cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries in the main tier.
/// - `history_capacity`: Maximum number of not-yet-admitted keys whose
///   touch counts are remembered. A larger history tolerates longer gaps
///   between the touches that earn admission.
/// - `promotion_threshold`: Number of touches (K) required before a key is
///   admitted into the main tier. Both `put` and `get` count as touches.
#[derive(Clone, Copy)]
pub struct LruKCacheConfig {
    /// Maximum number of key-value pairs the main tier can hold.
    pub capacity: NonZeroUsize,
    /// Maximum number of candidate keys tracked in the history tier.
    pub history_capacity: NonZeroUsize,
    /// Touch count at which a candidate key is admitted (K).
    pub promotion_threshold: NonZeroUsize,
}

impl fmt::Debug for LruKCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruKCacheConfig")
            .field("capacity", &self.capacity)
            .field("history_capacity", &self.history_capacity)
            .field("promotion_threshold", &self.promotion_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_k_config_creation() {
        let config = LruKCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
            history_capacity: NonZeroUsize::new(300).unwrap(),
            promotion_threshold: NonZeroUsize::new(2).unwrap(),
        };
        assert_eq!(config.capacity.get(), 100);
        assert_eq!(config.history_capacity.get(), 300);
        assert_eq!(config.promotion_threshold.get(), 2);
    }
}
