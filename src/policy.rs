//! Replacement-policy capability interface.
//!
//! Every eviction variant in this crate implements [`CachePolicy`], so call
//! sites can be generic over the policy and swap variants without any
//! behavioral assumptions beyond this contract: `put` always succeeds,
//! `get` returns the value with policy-defined bookkeeping side effects,
//! and a miss is an ordinary `None`, never an error.
//!
//! `get` takes `&mut self` deliberately: for every policy here a lookup
//! mutates ordering or frequency state, so reads are writes. `contains` is
//! the non-mutating membership probe.
//!
//! # Example
//!
//! ```
//! use evict_rs::{CachePolicy, LruCache, LfuCache};
//! use core::num::NonZeroUsize;
//!
//! fn warm<P: CachePolicy<u32, u32>>(cache: &mut P) {
//!     for i in 0..10 {
//!         cache.put(i, i * i);
//!     }
//! }
//!
//! let mut lru = LruCache::new(NonZeroUsize::new(16).unwrap());
//! let mut lfu = LfuCache::new(NonZeroUsize::new(16).unwrap());
//! warm(&mut lru);
//! warm(&mut lfu);
//! assert_eq!(lru.get(&3), Some(&9));
//! ```

/// Common contract implemented by every replacement policy.
///
/// Implemented by [`LruCache`](crate::LruCache),
/// [`LruKCache`](crate::LruKCache), [`LfuCache`](crate::LfuCache),
/// [`ArcCache`](crate::ArcCache) and, with the `sharded` feature, by
/// [`ShardedLruCache`](crate::ShardedLruCache) and
/// [`ShardedLfuCache`](crate::ShardedLfuCache).
pub trait CachePolicy<K, V> {
    /// Inserts or overwrites `key`, applying the policy's admission and
    /// eviction rules. Never fails.
    fn put(&mut self, key: K, value: V);

    /// Looks up `key`, returning a clone of the value on a hit.
    ///
    /// A hit updates the policy's internal bookkeeping (recency order,
    /// frequency counters, ghost adaptation); a miss is `None` and, except
    /// for policies that learn from misses, leaves residency unchanged.
    fn get(&mut self, key: &K) -> Option<V>;

    /// Returns `true` if `key` is resident, without disturbing ordering or
    /// frequency state.
    fn contains(&self, key: &K) -> bool;
}
