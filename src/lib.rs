#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! This section provides quick code examples and API references for each
//! eviction policy.
//!
//! ## Policy Selection Guide
//!
//! | Policy | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`LruCache`] | Least Recently Used | General purpose, recency-based access |
//! | [`LruKCache`] | LRU with K-touch admission | Scan-heavy workloads polluting the cache |
//! | [`LfuCache`] | LFU with frequency aging | Popularity-based access that shifts over time |
//! | [`ArcCache`] | Adaptive Replacement Cache | Mixed workloads, no time for tuning |
//! | [`ShardedLruCache`] | Lock-striped LRU | Multi-threaded, recency-based access |
//! | [`ShardedLfuCache`] | Lock-striped LFU | Multi-threaded, popularity-based access |
//!
//! Every policy implements [`CachePolicy`], so call sites can be written
//! once and swap the variant through configuration.
//!
//! ## Performance Characteristics
//!
//! | Policy | Get | Put | Scan Resist | Adapts |
//! |--------|-----|-----|-------------|--------|
//! | LRU    | O(1)| O(1)| Poor        | No     |
//! | LRU-K  | O(1)| O(1)| Excellent   | No     |
//! | LFU    | O(log B)* | O(log B)* | Excellent | Aging |
//! | ARC    | O(log B)* | O(log B)* | Good | Yes |
//!
//! \* B = number of distinct frequency values, typically tiny.
//!
//! ## Code Examples
//!
//! ### LRU (Least Recently Used)
//!
//! Evicts the entry that has gone unused for the longest time. Simple and
//! effective for workloads with temporal locality.
//!
//! ```rust
//! use evict_rs::LruCache;
//! use evict_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ### LRU-K (K-touch admission)
//!
//! Delays admission until a key has been touched K times, so a one-off
//! scan can never displace the hot working set.
//!
//! ```rust
//! use evict_rs::LruKCache;
//! use core::num::NonZeroUsize;
//!
//! let two = NonZeroUsize::new(2).unwrap();
//! let mut cache = LruKCache::new(two, NonZeroUsize::new(8).unwrap(), two);
//!
//! cache.put("page", 1);             // first touch: not yet resident
//! assert!(!cache.contains(&"page"));
//! assert_eq!(cache.get(&"page"), Some(&1)); // second touch: admitted
//! ```
//!
//! ### LFU with frequency aging
//!
//! Evicts the least frequently used entry, breaking ties in insertion
//! order, and periodically rescales frequencies so stale popularity
//! decays.
//!
//! ```rust
//! use evict_rs::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 { cache.get(&"popular"); }
//!
//! cache.put("new", 3);  // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! ```
//!
//! ### ARC (Adaptive Replacement Cache)
//!
//! Splits capacity between a recency part and a frequency part, and moves
//! capacity toward whichever discipline the workload rewards, learning
//! from ghost lists of recently evicted keys.
//!
//! ```rust
//! use evict_rs::ArcCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = ArcCache::new(NonZeroUsize::new(8).unwrap());
//! cache.put("k", 42);
//! assert_eq!(cache.get(&"k"), Some(42)); // second access promotes "k"
//! ```
//!
//! ## Sharded Caches
//!
//! The `sharded` feature (enabled by default) provides lock-striped
//! variants that are safe to share across threads:
//!
//! ```rust
//! # #[cfg(feature = "sharded")] {
//! use evict_rs::ShardedLruCache;
//! use evict_rs::config::{ShardedCacheConfig, LruCacheConfig};
//! use evict_rs::sharded::suggested_shard_count;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(ShardedLruCache::new(ShardedCacheConfig {
//!     base: LruCacheConfig {
//!         capacity: NonZeroUsize::new(10_000).unwrap(),
//!     },
//!     shards: suggested_shard_count(),
//! }));
//!
//! let worker = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     worker.put("key".to_string(), 42);
//! }).join().unwrap();
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`lru_k`]: LRU-K cache with K-touch admission
//! - [`lfu`]: Least Frequently Used cache with frequency aging
//! - [`arc`]: Adaptive Replacement Cache
//! - [`sharded`]: Lock-striped sharded variants (requires `sharded` feature)
//! - [`policy`]: The common `CachePolicy` capability interface
//! - [`config`]: Configuration structures for all eviction policies
//! - [`metrics`]: Metrics collection for cache performance monitoring

#![no_std]

/// Slot-arena ordered list shared by every eviction engine.
///
/// **Note**: This module is internal infrastructure and is not exposed to
/// library consumers. Use the high-level cache implementations instead.
pub(crate) mod list;

/// The common capability interface implemented by every eviction policy.
pub mod policy;

/// Cache configuration structures.
///
/// Provides configuration structures for all eviction-policy
/// implementations.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used
/// entries when the capacity is reached.
pub mod lru;

/// LRU-K cache implementation.
///
/// An LRU cache that admits a key into the main tier only after K
/// touches, tracked in a secondary history tier. Bounds cache pollution
/// from one-off scans.
pub mod lru_k;

/// Least Frequently Used (LFU) cache implementation with frequency aging.
///
/// Provides a fixed-size cache that evicts the least frequently used
/// entries, breaking ties in insertion order, with periodic frequency
/// rescaling so stale popularity decays.
pub mod lfu;

/// Adaptive Replacement Cache (ARC) implementation.
///
/// Composes a recency sub-part and a frequency sub-part with ghost lists
/// of recently evicted keys, migrating capacity toward whichever
/// discipline the workload rewards.
pub mod arc;

/// Cache metrics system.
///
/// Provides a flexible metrics collection and reporting system for all
/// eviction policies. Each policy tracks policy-specific metrics while
/// implementing a common interface.
pub mod metrics;

/// Lock-striped sharded cache implementations.
///
/// Partitions the key space across independently locked engine instances
/// for low-contention multi-threaded access.
///
/// Available when the `sharded` feature is enabled.
#[cfg(feature = "sharded")]
pub mod sharded;

// Re-export cache types
pub use arc::ArcCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use lru_k::LruKCache;

// Re-export the capability interface
pub use policy::CachePolicy;

#[cfg(feature = "sharded")]
pub use sharded::{ShardedLfuCache, ShardedLruCache};
