//! Least Frequently Used (LFU) Cache Implementation
//!
//! This module provides an LFU cache that evicts the entry with the lowest
//! access frequency, breaking ties in insertion order (FIFO). A periodic
//! frequency-aging pass rescales all counters so that long-lived hot keys
//! cannot permanently starve newly useful cold keys.
//!
//! # Algorithm
//!
//! Entries are grouped into frequency buckets: an ordered map from
//! frequency value to an arena-backed list of the entries holding exactly
//! that frequency, oldest first. A hit removes the entry from its bucket
//! and reinserts it into the next-higher bucket. Eviction pops the oldest
//! entry of the lowest populated bucket, tracked by `min_frequency`.
//!
//! # Frequency aging
//!
//! The segment keeps a running total of resident frequencies. Whenever the
//! average frequency per entry exceeds the configured threshold A, every
//! frequency rescales to `max(1, frequency - A/2)` and the buckets are
//! rebuilt. Without this, a key that was hot last week would still outrank
//! every key that became hot today.
//!
//! # Performance Characteristics
//!
//! - Get: O(log B) where B is the number of distinct frequency values
//! - Put: O(log B)
//! - Aging rescale: O(n), amortized over the accesses that triggered it
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Wrap it in a `Mutex`, or use
//! [`ShardedLfuCache`](crate::ShardedLfuCache) for lock-striped access.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::list::{Handle, List};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::{NonZeroU64, NonZeroUsize};

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

/// Aging threshold used by [`LfuCache::new`] when no configuration is
/// given. High enough that short-lived caches never age; long-running
/// caches still rescale eventually.
pub const DEFAULT_MAX_AVERAGE_FREQUENCY: NonZeroU64 = match NonZeroU64::new(1_000_000) {
    Some(v) => v,
    None => unreachable!(),
};

/// Internal LFU segment containing the actual cache algorithm.
///
/// Shared between `LfuCache` (single-threaded) and `ShardedLfuCache` (one
/// segment per shard).
///
/// Bucket invariant: no frequency bucket is both present and empty, and
/// `min_frequency` always names the lowest populated bucket while any
/// entry is resident.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    /// key → (current frequency, handle into that frequency's bucket).
    map: HashMap<K, (u64, Handle), S>,
    /// frequency → entries holding exactly that frequency, oldest first.
    buckets: BTreeMap<u64, List<(K, V)>>,
    min_frequency: u64,
    /// Sum of all resident frequencies, for the aging average.
    total_frequency: u64,
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuSegment<K, V, S> {
    pub(crate) fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        LfuSegment {
            config,
            map: HashMap::with_capacity_and_hasher(cap.next_power_of_two(), hash_builder),
            buckets: BTreeMap::new(),
            min_frequency: 1,
            total_frequency: 0,
            metrics: LfuCacheMetrics::new(),
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
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    /// Moves a resident entry from its current bucket into the next-higher
    /// one, then runs the aging check.
    fn bump<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&(freq, handle)) = self.map.get(key) else {
            return;
        };
        let Some(entry) = self
            .buckets
            .get_mut(&freq)
            .and_then(|bucket| bucket.remove(handle))
        else {
            return;
        };
        if self.buckets.get(&freq).is_some_and(List::is_empty) {
            self.buckets.remove(&freq);
            // The bucket we reinsert into is the next one up, so the
            // lowest populated frequency is exactly freq + 1.
            if self.min_frequency == freq {
                self.min_frequency = freq + 1;
            }
        }

        let new_freq = freq + 1;
        let map_key = entry.0.clone();
        let new_handle = self.buckets.entry(new_freq).or_default().push_back(entry);
        self.map.insert(map_key, (new_freq, new_handle));
        self.total_frequency += 1;
        self.metrics.record_frequency_increment(new_freq);

        self.maybe_age();
    }

    /// Evicts the oldest entry of the lowest populated bucket.
    fn evict_least_frequent(&mut self) -> Option<(K, V)> {
        let freq = self.min_frequency;
        let bucket = self.buckets.get_mut(&freq)?;
        let entry = bucket.pop_front()?;
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        self.map.remove(&entry.0);
        self.total_frequency -= freq;
        self.metrics.core.record_eviction();
        Some(entry)
    }

    /// Rescales all frequencies once the running average exceeds the
    /// configured threshold.
    fn maybe_age(&mut self) {
        let resident = self.map.len() as u64;
        if resident == 0 {
            return;
        }
        let threshold = self.config.max_average_frequency.get();
        if self.total_frequency / resident <= threshold {
            return;
        }

        let decay = threshold / 2;
        let old_buckets = core::mem::take(&mut self.buckets);
        self.total_frequency = 0;
        for (freq, mut bucket) in old_buckets {
            let new_freq = core::cmp::max(1, freq.saturating_sub(decay));
            while let Some((key, value)) = bucket.pop_front() {
                let map_key = key.clone();
                let handle = self
                    .buckets
                    .entry(new_freq)
                    .or_default()
                    .push_back((key, value));
                self.map.insert(map_key, (new_freq, handle));
                self.total_frequency += new_freq;
            }
        }
        self.min_frequency = self.buckets.keys().next().copied().unwrap_or(1);
        self.metrics.record_aging_rescale();
    }

    /// Looks up `key`, bumping its frequency on a hit.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.map.contains_key(key) {
            self.metrics.core.record_miss();
            return None;
        }
        self.metrics.core.record_hit();
        self.bump(key);

        // Aging may have rebuilt the buckets, so resolve the handle fresh.
        let &(freq, handle) = self.map.get(key)?;
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(handle))
            .map(|(_, v)| v)
    }

    /// Looks up `key` without touching frequency state or metrics.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &(freq, handle) = self.map.get(key)?;
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(handle))
            .map(|(_, v)| v)
    }

    /// Inserts or overwrites `key`, returning the entry evicted to make
    /// room (if any). An overwrite counts as a use and bumps the key's
    /// frequency.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&(freq, handle)) = self.map.get(&key) {
            if let Some((_, v)) = self
                .buckets
                .get_mut(&freq)
                .and_then(|bucket| bucket.get_mut(handle))
            {
                *v = value;
            }
            self.bump(&key);
            return None;
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            evicted = self.evict_least_frequent();
        }

        let handle = self
            .buckets
            .entry(1)
            .or_default()
            .push_back((key.clone(), value));
        self.map.insert(key, (1, handle));
        self.min_frequency = 1;
        self.total_frequency += 1;
        self.metrics.core.record_insertion();

        evicted
    }

    /// Removes every entry and resets frequency state.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.min_frequency = 1;
        self.total_frequency = 0;
    }

    /// Current frequency of a resident key. Test support.
    #[cfg(test)]
    fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|&(freq, _)| freq)
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("total_frequency", &self.total_frequency)
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache with
/// frequency aging.
///
/// The cache has a fixed capacity and evicts the least frequently used
/// entry when full, breaking frequency ties in insertion order. All
/// frequencies are periodically rescaled once their average exceeds the
/// configured threshold, so old popularity decays.
///
/// # Examples
///
/// ```
/// use evict_rs::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // "apple" now has the higher frequency.
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // "banana" is least frequently used and gets evicted.
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default> LfuCache<K, V, S> {
    /// Creates an LFU cache from a configuration with an optional hasher.
    ///
    /// Passing `None` uses the default hash builder.
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self {
        Self {
            segment: LfuSegment::with_hasher(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V> LfuCache<K, V> {
    /// Creates an LFU cache with the specified capacity and the default
    /// aging threshold ([`DEFAULT_MAX_AVERAGE_FREQUENCY`]).
    pub fn new(cap: NonZeroUsize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::init(
            LfuCacheConfig {
                capacity: cap,
                max_average_frequency: DEFAULT_MAX_AVERAGE_FREQUENCY,
            },
            None,
        )
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuCache<K, V, S> {
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
    /// A hit increments the entry's frequency and may trigger an aging
    /// rescale.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a reference to the value without updating frequency state.
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
    /// Overwriting a resident key counts as a use and bumps its frequency.
    /// If the insertion evicted the least frequently used entry, that
    /// entry is returned.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for LfuCache<K, V, S> {
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

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aging_cache(cap: usize, threshold: u64) -> LfuCache<&'static str, i32> {
        LfuCache::init(
            LfuCacheConfig {
                capacity: NonZeroUsize::new(cap).unwrap(),
                max_average_frequency: NonZeroU64::new(threshold).unwrap(),
            },
            None,
        )
    }

    #[test]
    fn test_lfu_get_put() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);

        // "apple" has frequency 3, "banana" stays at 1.
        cache.get(&"apple");
        cache.get(&"apple");

        cache.put("cherry", 3);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lfu_equal_frequencies_evict_fifo() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("first", 1);
        cache.put("second", 2);

        // Both at frequency 1; the older insertion loses.
        cache.put("third", 3);
        assert_eq!(cache.get(&"first"), None);
        assert_eq!(cache.get(&"second"), Some(&2));
        assert_eq!(cache.get(&"third"), Some(&3));
    }

    #[test]
    fn test_lfu_overwrite_bumps_frequency() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        assert_eq!(cache.segment.frequency(&"apple"), Some(1));

        cache.put("apple", 2);
        assert_eq!(cache.segment.frequency(&"apple"), Some(2));
        assert_eq!(cache.get(&"apple"), Some(&2));

        // "banana" at frequency 1 is now the eviction candidate.
        cache.put("banana", 3);
        cache.put("cherry", 4);
        assert_eq!(cache.peek(&"banana"), None);
        assert_eq!(cache.peek(&"apple"), Some(&2));
    }

    #[test]
    fn test_lfu_min_frequency_advances() {
        let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        // Raise every key off frequency 1; min must follow.
        cache.get(&"a");
        cache.get(&"b");
        cache.get(&"c");
        cache.get(&"c");

        // "a" and "b" share frequency 2; "a" is older.
        cache.put("d", 4);
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.peek(&"b"), Some(&2));
        assert_eq!(cache.peek(&"c"), Some(&3));
        assert_eq!(cache.peek(&"d"), Some(&4));
    }

    #[test]
    fn test_lfu_aging_rescales_frequencies() {
        let mut cache = aging_cache(2, 2);
        cache.put("hot", 1);
        cache.put("cold", 2);

        // Drive "hot" until the average frequency exceeds the threshold.
        for _ in 0..4 {
            cache.get(&"hot");
        }

        let metrics = cache.metrics();
        assert!(metrics.get("aging_rescales").unwrap() >= &1.0);

        // No frequency drops below 1 and both keys stay resident.
        assert!(cache.segment.frequency(&"hot").unwrap() >= 1);
        assert_eq!(cache.segment.frequency(&"cold"), Some(1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lfu_aging_lets_new_keys_compete() {
        let mut cache = aging_cache(2, 2);
        cache.put("old_hot", 1);
        for _ in 0..10 {
            cache.get(&"old_hot");
        }

        // After aging, a newly warm key can out-frequency the old one.
        cache.put("newcomer", 2);
        cache.get(&"newcomer");
        cache.get(&"newcomer");
        let old = cache.segment.frequency(&"old_hot").unwrap();
        let new = cache.segment.frequency(&"newcomer").unwrap();
        assert!(new >= old || old <= 6, "aging kept old frequency bounded");
    }

    #[test]
    fn test_lfu_aging_recomputes_min_frequency() {
        let mut cache = aging_cache(3, 2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"b");
        for _ in 0..6 {
            cache.get(&"a");
        }
        assert!(cache.metrics().get("aging_rescales").unwrap() >= &1.0);

        // Eviction after a rescale must still pick the lowest bucket.
        cache.put("c", 3);
        cache.put("d", 4);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek(&"a"), Some(&1));
    }

    #[test]
    fn test_lfu_capacity_never_exceeded() {
        let mut cache: LfuCache<i32, i32> = LfuCache::new(NonZeroUsize::new(5).unwrap());
        for i in 0..100 {
            cache.put(i, i);
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.get(&"apple");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek(&"apple"), None);

        cache.put("banana", 2);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.segment.frequency(&"banana"), Some(1));
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.get(&"apple");
        cache.get(&"missing");
        cache.put("banana", 2);
        cache.put("cherry", 3);

        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&3.0));
        assert_eq!(metrics.get("max_frequency"), Some(&2.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }
}
