//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LruCacheConfig;
//! use evict_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when the cache reaches
/// capacity. Both `get` and `put` refresh an entry's recency.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. `NonZeroUsize`
///   makes a zero-capacity cache unrepresentable, so construction cannot
///   silently produce a cache that stores nothing.
///
/// # Examples
///
/// ```
/// use evict_rs::config::LruCacheConfig;
/// use evict_rs::LruCache;
/// use core::num::NonZeroUsize;
///
/// let config = LruCacheConfig {
///     capacity: NonZeroUsize::new(10_000).unwrap(),
/// };
/// let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
/// ```
#[derive(Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_zero_capacity_is_unrepresentable() {
        assert!(NonZeroUsize::new(0).is_none());
    }
}
