//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a memory-efficient LRU cache with O(1) operations
//! for all common cache operations. LRU is one of the most widely used
//! eviction algorithms due to its simplicity and good performance for
//! workloads with temporal locality.
//!
//! # Algorithm
//!
//! The cache keeps entries in recency order inside an arena-backed list:
//! the list tail is the most recently used entry, the head is the least
//! recently used and therefore the first eviction candidate. Both `get`
//! and `put` refresh an entry's position, so a lookup is a structural
//! write.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!
//! # When to Use
//!
//! LRU caches are ideal for:
//! - General-purpose caching where access patterns exhibit temporal locality
//! - Simple behavior with predictable performance
//!
//! They are less suitable for:
//! - Workloads where frequency of access matters more than recency
//! - Scanning patterns where a large set of items is accessed once in
//!   sequence (see [`LruKCache`](crate::LruKCache) for that case)
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Wrap it in a `Mutex`, or use
//! [`ShardedLruCache`](crate::ShardedLruCache) for lock-striped access.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::list::{Handle, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between `LruCache` (single-threaded), `LruKCache`
/// (as both its main and history tiers) and `ShardedLruCache` (one
/// segment per shard). All algorithm logic is implemented here to avoid
/// duplication.
///
/// The key→handle map and the recency list are kept in lockstep: every
/// resident key owns exactly one list entry, and handles are dropped from
/// the map in the same operation that removes the entry from the list.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    /// Recency order; head = least recently used, tail = most recent.
    list: List<(K, V)>,
    map: HashMap<K, Handle, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        LruSegment {
            config,
            list: List::with_capacity(cap),
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Looks up `key` and refreshes its recency on a hit.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(&handle) = self.map.get(key) {
            self.list.move_to_back(handle);
            self.metrics.core.record_hit();
            self.list.get(handle).map(|(_, v)| v)
        } else {
            self.metrics.core.record_miss();
            None
        }
    }

    /// Looks up `key` with mutable access, refreshing recency on a hit.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(&handle) = self.map.get(key) {
            self.list.move_to_back(handle);
            self.metrics.core.record_hit();
            self.list.get_mut(handle).map(|(_, v)| v)
        } else {
            self.metrics.core.record_miss();
            None
        }
    }

    /// Looks up `key` without touching recency order or metrics.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &handle = self.map.get(key)?;
        self.list.get(handle).map(|(_, v)| v)
    }

    /// Inserts or overwrites `key`, returning the entry evicted to make
    /// room (if any).
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&handle) = self.map.get(&key) {
            if let Some((_, v)) = self.list.get_mut(handle) {
                *v = value;
            }
            self.list.move_to_back(handle);
            return None;
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some((old_key, old_value)) = self.list.pop_front() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                evicted = Some((old_key, old_value));
            }
        }

        let handle = self.list.push_back((key.clone(), value));
        self.map.insert(key, handle);
        self.metrics.core.record_insertion();

        evicted
    }

    /// Removes `key`, returning its value if it was resident.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.remove(key)?;
        self.list.remove(handle).map(|(_, v)| v)
    }

    /// Removes every entry.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches
/// capacity, the least recently used entry is evicted to make room.
///
/// # Examples
///
/// ```
/// use evict_rs::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default> LruCache<K, V, S> {
    /// Creates an LRU cache from a configuration with an optional hasher.
    ///
    /// Passing `None` uses the default hash builder.
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self {
        Self {
            segment: LruSegment::with_hasher(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(LruCacheConfig { capacity: cap }, hash_builder),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// A hit moves the entry to the most recently used position.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// A hit moves the entry to the most recently used position.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns a reference to the value without updating recency order.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key was already resident, its value is overwritten in place.
    /// If the insertion evicted the least recently used entry, that entry
    /// is returned.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }

    /// Removes a key from the cache, returning its value if present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Creates an LRU cache with the specified capacity.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for LruCache<K, V, S> {
    fn put(&mut self, key: K, value: V) {
        self.segment.put(key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        self.segment.get(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.segment.peek(key).is_some()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
