//! Lock-striped sharded cache variants.
//!
//! Sharding partitions the key space across N independent engine
//! instances, each guarded by its own lock, so threads working on
//! disjoint keys never contend. Routing is `hash(key) mod N` with the
//! cache's own hash builder and is stable for the cache's lifetime.
//!
//! # Lock discipline
//!
//! Every operation locks exactly one shard, the key's owner, for the full
//! operation. Lookups mutate ordering or frequency state, so reads take
//! the same exclusive lock as writes. No operation ever holds two shard
//! locks at once, so lock-order cycles cannot form.
//!
//! # Shard count
//!
//! The shard count is always explicit configuration. Callers that want a
//! platform-derived default pass [`suggested_shard_count`]; the engines
//! never read the platform's concurrency hint behind the caller's back.

extern crate std;

mod lfu;
mod lru;

pub use lfu::ShardedLfuCache;
pub use lru::ShardedLruCache;

use core::num::NonZeroUsize;

/// Lower bound for [`suggested_shard_count`].
const MIN_SUGGESTED_SHARDS: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(v) => v,
    None => unreachable!(),
};

/// Upper bound for [`suggested_shard_count`]. More shards than this stop
/// paying for themselves and only fragment capacity.
const MAX_SUGGESTED_SHARDS: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(v) => v,
    None => unreachable!(),
};

/// Suggests a shard count from the platform's available parallelism,
/// clamped to a sensible range.
///
/// This is a convenience for callers filling in
/// [`ShardedCacheConfig::shards`](crate::config::ShardedCacheConfig);
/// the caches themselves never consult the platform.
///
/// # Examples
///
/// ```
/// use evict_rs::config::{ShardedCacheConfig, LruCacheConfig};
/// use evict_rs::sharded::suggested_shard_count;
/// use evict_rs::ShardedLruCache;
/// use core::num::NonZeroUsize;
///
/// let cache: ShardedLruCache<String, i32> = ShardedLruCache::new(ShardedCacheConfig {
///     base: LruCacheConfig {
///         capacity: NonZeroUsize::new(10_000).unwrap(),
///     },
///     shards: suggested_shard_count(),
/// });
/// ```
pub fn suggested_shard_count() -> NonZeroUsize {
    std::thread::available_parallelism()
        .map(|n| n.clamp(MIN_SUGGESTED_SHARDS, MAX_SUGGESTED_SHARDS))
        .unwrap_or(MIN_SUGGESTED_SHARDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_shard_count_is_clamped() {
        let n = suggested_shard_count();
        assert!(n >= MIN_SUGGESTED_SHARDS);
        assert!(n <= MAX_SUGGESTED_SHARDS);
    }
}
