//! Lock-striped sharded LFU cache.

extern crate alloc;
extern crate std;

use crate::config::ShardedLfuCacheConfig;
use crate::lfu::LfuSegment;
use crate::metrics::CacheMetrics;
use crate::policy::CachePolicy;
use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A sharded LFU cache for reduced lock contention.
///
/// The key space is hash-partitioned across N independent LFU segments,
/// each behind its own lock. Frequency state, including aging, is
/// per-shard: each shard ages its own entries once its own average
/// frequency crosses the configured threshold.
///
/// Each shard receives `ceil(capacity / shards)` slots; the aggregate
/// effective capacity may exceed the requested total by up to `shards - 1`
/// entries. See [`ShardedCacheConfig`](crate::config::ShardedCacheConfig).
///
/// All methods take `&self`; interior locking makes the cache directly
/// shareable across threads (e.g. inside an `Arc`).
///
/// # Examples
///
/// ```
/// use evict_rs::ShardedLfuCache;
/// use evict_rs::config::{ShardedCacheConfig, LfuCacheConfig};
/// use core::num::{NonZeroU64, NonZeroUsize};
///
/// let cache: ShardedLfuCache<String, i32> = ShardedLfuCache::new(ShardedCacheConfig {
///     base: LfuCacheConfig {
///         capacity: NonZeroUsize::new(1000).unwrap(),
///         max_average_frequency: NonZeroU64::new(10_000).unwrap(),
///     },
///     shards: NonZeroUsize::new(8).unwrap(),
/// });
///
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get("key"), Some(42));
/// ```
pub struct ShardedLfuCache<K, V, S = DefaultHashBuilder> {
    shards: Box<[Mutex<LfuSegment<K, V, S>>]>,
    /// Routing hasher; shared with every shard's map so a key hashes
    /// identically for routing and for lookup.
    hash_builder: S,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default + Clone> ShardedLfuCache<K, V, S> {
    /// Creates a sharded LFU cache from a configuration with an optional
    /// hasher. Passing `None` uses the default hash builder.
    pub fn init(config: ShardedLfuCacheConfig, hasher: Option<S>) -> Self {
        let hash_builder = hasher.unwrap_or_default();
        let shard_count = config.shards.get();
        let per_shard = NonZeroUsize::new(config.base.capacity.get().div_ceil(shard_count))
            .unwrap_or(NonZeroUsize::MIN);
        let shards: Vec<_> = (0..shard_count)
            .map(|_| {
                Mutex::new(LfuSegment::with_hasher(
                    crate::config::LfuCacheConfig {
                        capacity: per_shard,
                        max_average_frequency: config.base.max_average_frequency,
                    },
                    hash_builder.clone(),
                ))
            })
            .collect();
        ShardedLfuCache {
            shards: shards.into_boxed_slice(),
            hash_builder,
        }
    }
}

impl<K: Hash + Eq + Clone, V> ShardedLfuCache<K, V> {
    /// Creates a sharded LFU cache with the default hash builder.
    pub fn new(config: ShardedLfuCacheConfig) -> Self {
        Self::init(config, None)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ShardedLfuCache<K, V, S> {
    /// Returns the number of shards.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the aggregate capacity across all shards.
    pub fn cap(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().cap().get())
            .sum()
    }

    /// Returns the total number of resident entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Returns `true` if every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Returns a clone of the value for `key`, bumping its frequency in
    /// the owning shard.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    /// Inserts a key-value pair into the owning shard.
    pub fn put(&self, key: K, value: V) {
        self.shard(&key).lock().put(key, value);
    }

    /// Returns `true` if `key` is resident, without updating frequency
    /// state.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.shard(key).lock().peek(key).is_some()
    }

    /// Clears every shard.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }

    /// Routes a key to its owning shard. Stable for the cache's lifetime.
    fn shard<Q>(&self, key: &Q) -> &Mutex<LfuSegment<K, V, S>>
    where
        Q: ?Sized + Hash,
    {
        let index = (self.hash_builder.hash_one(key) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }
}

impl<K, V, S> core::fmt::Debug for ShardedLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShardedLfuCache")
            .field("shards", &self.shards.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V>
    for ShardedLfuCache<K, V, S>
{
    fn put(&mut self, key: K, value: V) {
        ShardedLfuCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ShardedLfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ShardedLfuCache::contains(self, key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for ShardedLfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut total = BTreeMap::new();
        for shard in self.shards.iter() {
            for (name, value) in shard.lock().metrics().metrics() {
                if name == "hit_rate" {
                    continue;
                }
                *total.entry(name).or_insert(0.0) += value;
            }
        }
        let requests = total.get("requests").copied().unwrap_or(0.0);
        let hits = total.get("cache_hits").copied().unwrap_or(0.0);
        let hit_rate = if requests > 0.0 { hits / requests } else { 0.0 };
        total.insert("hit_rate".to_owned(), hit_rate);
        total
    }

    fn algorithm_name(&self) -> &'static str {
        "Sharded-LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LfuCacheConfig, ShardedCacheConfig};
    use alloc::format;
    use alloc::string::ToString;
    use core::num::NonZeroU64;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    fn cache(capacity: usize, shards: usize) -> ShardedLfuCache<String, i32> {
        ShardedLfuCache::new(ShardedCacheConfig {
            base: LfuCacheConfig {
                capacity: NonZeroUsize::new(capacity).unwrap(),
                max_average_frequency: NonZeroU64::new(10_000).unwrap(),
            },
            shards: NonZeroUsize::new(shards).unwrap(),
        })
    }

    #[test]
    fn test_sharded_lfu_get_put() {
        let cache = cache(100, 4);
        cache.put("apple".to_string(), 1);
        cache.put("banana".to_string(), 2);
        assert_eq!(cache.get("apple"), Some(1));
        assert_eq!(cache.get("banana"), Some(2));
        assert_eq!(cache.get("cherry"), None);
    }

    #[test]
    fn test_sharded_lfu_frequency_protects_within_shard() {
        // A single shard makes the eviction deterministic.
        let cache = cache(2, 1);
        cache.put("hot".to_string(), 1);
        cache.put("cold".to_string(), 2);
        cache.get("hot");
        cache.get("hot");

        cache.put("new".to_string(), 3);
        assert!(cache.contains("hot"));
        assert!(!cache.contains("cold"));
    }

    #[test]
    fn test_sharded_lfu_aggregate_capacity_within_rounding_slack() {
        let requested = 10;
        let shards = 3;
        let cache = cache(requested, shards);
        let cap = cache.cap();
        assert!(cap >= requested);
        assert!(cap < requested + shards);
    }

    #[test]
    fn test_sharded_lfu_concurrent_access() {
        let cache = Arc::new(cache(400, 8));
        let mut handles: Vec<thread::JoinHandle<()>> = Vec::new();

        for t in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("thread_{}_key_{}", t, i);
                    cache.put(key.clone(), t * 1000 + i);
                    assert_eq!(cache.get(&key), Some(t * 1000 + i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= cache.cap());
    }

    #[test]
    fn test_sharded_lfu_clear_and_metrics() {
        let cache = cache(100, 4);
        cache.put("a".to_string(), 1);
        cache.get("a");
        cache.get("missing");

        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "Sharded-LFU");

        cache.clear();
        assert!(cache.is_empty());
    }
}
