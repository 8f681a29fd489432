//! Configuration for the Adaptive Replacement Cache (ARC).
//!
//! ARC splits its total capacity between a recency-tracked sub-part and a
//! frequency-tracked sub-part, then trades capacity between them based on
//! ghost-list hits. The split is internal; the configured `capacity` is the
//! fixed total the two sub-parts always sum to.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::ArcCacheConfig;
//! use evict_rs::ArcCache;
//! use core::num::NonZeroUsize;
//!
//! let config = ArcCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     transform_threshold: NonZeroUsize::new(2).unwrap(),
//! };
//! let cache: ArcCache<String, i32> = ArcCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an ARC (Adaptive Replacement Cache).
///
/// # Fields
///
/// - `capacity`: Fixed total capacity. It is split evenly between the two
///   sub-parts at construction and the pair trades slots one at a time as
///   ghost hits accumulate; their capacities always sum to this total.
/// - `transform_threshold`: Access count at which an entry in the recency
///   sub-part is also written into the frequency sub-part (hot promotion).
#[derive(Clone, Copy)]
pub struct ArcCacheConfig {
    /// Fixed total capacity traded between the two sub-parts.
    pub capacity: NonZeroUsize,
    /// Access count that promotes a recency entry into the frequency part.
    pub transform_threshold: NonZeroUsize,
}

impl fmt::Debug for ArcCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheConfig")
            .field("capacity", &self.capacity)
            .field("transform_threshold", &self.transform_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_config_creation() {
        let config = ArcCacheConfig {
            capacity: NonZeroUsize::new(50).unwrap(),
            transform_threshold: NonZeroUsize::new(3).unwrap(),
        };
        assert_eq!(config.capacity.get(), 50);
        assert_eq!(config.transform_threshold.get(), 3);
    }
}
