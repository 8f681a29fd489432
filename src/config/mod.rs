//! Cache Configuration Module
//!
//! This module provides configuration structures for all eviction-policy
//! implementations. Each policy has its own dedicated configuration struct
//! with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **Fail fast**: Capacities and thresholds are `NonZero` types, so a
//!   zero or negative capacity is unrepresentable rather than a runtime
//!   check that could be missed
//!
//! # Single-Threaded Policy Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | `LruKCacheConfig` | [`LruKCache`](crate::LruKCache) | LRU with K-touch admission |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | LFU with frequency aging |
//! | `ArcCacheConfig` | [`ArcCache`](crate::ArcCache) | Adaptive Replacement Cache |
//!
//! # Sharded Policy Configs (requires `sharded` feature)
//!
//! Use `ShardedCacheConfig<C>` as a wrapper around any base config:
//!
//! | Type Alias | Base Config | Description |
//! |------------|-------------|-------------|
//! | `ShardedLruCacheConfig` | `LruCacheConfig` | Lock-striped LRU |
//! | `ShardedLfuCacheConfig` | `LfuCacheConfig` | Lock-striped LFU |
//!
//! The shard count is always explicit. Callers that want a
//! platform-derived default can pass
//! [`suggested_shard_count()`](crate::sharded::suggested_shard_count);
//! the engines never consult the platform behind the caller's back.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LruCacheConfig;
//! use evict_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! ```

// Single-threaded policy configs
pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;

// Re-exports for convenience - single-threaded
pub use arc::ArcCacheConfig;
pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
pub use lru_k::LruKCacheConfig;

#[cfg(feature = "sharded")]
use core::num::NonZeroUsize;

/// Generic configuration wrapper for sharded caches.
///
/// Wraps any base policy configuration and adds the `shards` field
/// controlling the number of independently locked engine instances.
///
/// The base `capacity` is the *total* across all shards. Each shard
/// receives `ceil(capacity / shards)` slots, so the effective aggregate
/// capacity may exceed the requested total by up to `shards - 1` entries.
/// This rounding slack is an accepted approximation of the total bound.
///
/// # Type Parameter
///
/// - `C`: The base policy configuration type (e.g., `LruCacheConfig`)
///
/// # Example
///
/// ```
/// use evict_rs::config::{ShardedCacheConfig, LruCacheConfig, ShardedLruCacheConfig};
/// use core::num::NonZeroUsize;
///
/// let config: ShardedLruCacheConfig = ShardedCacheConfig {
///     base: LruCacheConfig {
///         capacity: NonZeroUsize::new(10_000).unwrap(),
///     },
///     shards: NonZeroUsize::new(16).unwrap(),
/// };
/// ```
#[cfg(feature = "sharded")]
#[derive(Clone, Copy)]
pub struct ShardedCacheConfig<C> {
    /// Base configuration for the underlying policy; its capacity is the
    /// total across all shards.
    pub base: C,
    /// Number of independently locked shards (more = less contention).
    pub shards: NonZeroUsize,
}

#[cfg(feature = "sharded")]
impl<C: core::fmt::Debug> core::fmt::Debug for ShardedCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShardedCacheConfig")
            .field("base", &self.base)
            .field("shards", &self.shards)
            .finish()
    }
}

#[cfg(feature = "sharded")]
/// Configuration for a sharded LRU cache.
/// Type alias for `ShardedCacheConfig<LruCacheConfig>`.
pub type ShardedLruCacheConfig = ShardedCacheConfig<LruCacheConfig>;

#[cfg(feature = "sharded")]
/// Configuration for a sharded LFU cache.
/// Type alias for `ShardedCacheConfig<LfuCacheConfig>`.
pub type ShardedLfuCacheConfig = ShardedCacheConfig<LfuCacheConfig>;
