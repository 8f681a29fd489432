//! Lock-striped sharded LRU cache.

extern crate alloc;
extern crate std;

use crate::config::ShardedLruCacheConfig;
use crate::lru::LruSegment;
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

/// A sharded LRU cache for reduced lock contention.
///
/// The key space is hash-partitioned across N independent LRU segments,
/// each behind its own lock, so threads touching different shards never
/// contend. A key routes to the same shard for the cache's entire
/// lifetime.
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
/// use evict_rs::ShardedLruCache;
/// use evict_rs::config::{ShardedCacheConfig, LruCacheConfig};
/// use core::num::NonZeroUsize;
///
/// let cache: ShardedLruCache<String, i32> = ShardedLruCache::new(ShardedCacheConfig {
///     base: LruCacheConfig {
///         capacity: NonZeroUsize::new(1000).unwrap(),
///     },
///     shards: NonZeroUsize::new(8).unwrap(),
/// });
///
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get("key"), Some(42));
/// ```
pub struct ShardedLruCache<K, V, S = DefaultHashBuilder> {
    shards: Box<[Mutex<LruSegment<K, V, S>>]>,
    /// Routing hasher; shared with every shard's map so a key hashes
    /// identically for routing and for lookup.
    hash_builder: S,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default + Clone> ShardedLruCache<K, V, S> {
    /// Creates a sharded LRU cache from a configuration with an optional
    /// hasher. Passing `None` uses the default hash builder.
    pub fn init(config: ShardedLruCacheConfig, hasher: Option<S>) -> Self {
        let hash_builder = hasher.unwrap_or_default();
        let shard_count = config.shards.get();
        let per_shard = NonZeroUsize::new(config.base.capacity.get().div_ceil(shard_count))
            .unwrap_or(NonZeroUsize::MIN);
        let shards: Vec<_> = (0..shard_count)
            .map(|_| {
                Mutex::new(LruSegment::with_hasher(
                    crate::config::LruCacheConfig {
                        capacity: per_shard,
                    },
                    hash_builder.clone(),
                ))
            })
            .collect();
        ShardedLruCache {
            shards: shards.into_boxed_slice(),
            hash_builder,
        }
    }
}

impl<K: Hash + Eq + Clone, V> ShardedLruCache<K, V> {
    /// Creates a sharded LRU cache with the default hash builder.
    pub fn new(config: ShardedLruCacheConfig) -> Self {
        Self::init(config, None)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ShardedLruCache<K, V, S> {
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

    /// Returns a clone of the value for `key`, refreshing its recency in
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

    /// Returns `true` if `key` is resident, without updating recency.
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
    fn shard<Q>(&self, key: &Q) -> &Mutex<LruSegment<K, V, S>>
    where
        Q: ?Sized + Hash,
    {
        let index = (self.hash_builder.hash_one(key) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }
}

impl<K, V, S> core::fmt::Debug for ShardedLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shards", &self.shards.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V>
    for ShardedLruCache<K, V, S>
{
    fn put(&mut self, key: K, value: V) {
        ShardedLruCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ShardedLruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ShardedLruCache::contains(self, key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for ShardedLruCache<K, V, S> {
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
        "Sharded-LRU"
    }
}
