//! LRU-K Cache Implementation
//!
//! LRU-K delays admission into the cache until a key has been touched K
//! times. A main LRU tier holds admitted entries; a secondary history LRU
//! tier counts touches for keys that have not yet earned residency, with
//! their most recent value stashed aside until promotion.
//!
//! # Algorithm
//!
//! Every `put` or `get` of a non-resident key counts as one touch and is
//! recorded in the history tier. Once a key's touch count reaches K and a
//! value has been stashed for it, the key is promoted: its history entry
//! and stashed value are dropped and the entry is inserted into the main
//! tier, where plain LRU recency rules apply from then on.
//!
//! The history tier is itself a bounded LRU, so touch counts for keys that
//! stay cold are eventually forgotten along with their stashed values.
//!
//! # When to Use
//!
//! LRU-K shines when the workload mixes a hot working set with large
//! one-off scans: a single cold touch can never displace hot data, because
//! residency is only earned after K touches. With K = 1 it degenerates to
//! plain LRU.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Wrap it in a `Mutex` for shared
//! access.

extern crate alloc;

use crate::config::{LruCacheConfig, LruKCacheConfig};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruKCacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
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

/// An LRU cache with K-touch admission.
///
/// Entries only enter the main tier after being touched K times. Until
/// then the key lives in a bounded history tier together with its most
/// recently written value.
///
/// # Examples
///
/// ```
/// use evict_rs::LruKCache;
/// use core::num::NonZeroUsize;
///
/// let two = NonZeroUsize::new(2).unwrap();
/// let mut cache = LruKCache::new(two, NonZeroUsize::new(4).unwrap(), two);
///
/// // First touch: stashed, not yet resident.
/// cache.put("apple", 1);
/// assert!(!cache.contains(&"apple"));
///
/// // Second touch promotes the key into the main tier.
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert!(cache.contains(&"apple"));
/// ```
pub struct LruKCache<K, V, S = DefaultHashBuilder> {
    /// Admitted entries under plain LRU rules.
    main: LruSegment<K, V, S>,
    /// Touch counts for keys not yet admitted.
    history: LruSegment<K, u64, S>,
    /// Latest written value for each key still in the history tier.
    pending: HashMap<K, V, S>,
    promotion_threshold: u64,
    metrics: LruKCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default + Clone> LruKCache<K, V, S> {
    /// Creates an LRU-K cache from a configuration with an optional hasher.
    ///
    /// Passing `None` uses the default hash builder.
    pub fn init(config: LruKCacheConfig, hasher: Option<S>) -> Self {
        let hash_builder = hasher.unwrap_or_default();
        Self {
            main: LruSegment::with_hasher(
                LruCacheConfig {
                    capacity: config.capacity,
                },
                hash_builder.clone(),
            ),
            history: LruSegment::with_hasher(
                LruCacheConfig {
                    capacity: config.history_capacity,
                },
                hash_builder.clone(),
            ),
            pending: HashMap::with_hasher(hash_builder),
            promotion_threshold: config.promotion_threshold.get() as u64,
            metrics: LruKCacheMetrics::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> LruKCache<K, V> {
    /// Creates an LRU-K cache with the given main capacity, history
    /// capacity and touch threshold K.
    pub fn new(
        capacity: NonZeroUsize,
        history_capacity: NonZeroUsize,
        promotion_threshold: NonZeroUsize,
    ) -> Self {
        Self::init(
            LruKCacheConfig {
                capacity,
                history_capacity,
                promotion_threshold,
            },
            None,
        )
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruKCache<K, V, S> {
    /// Returns the main tier's capacity.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.main.cap()
    }

    /// Returns the number of entries resident in the main tier.
    #[inline]
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Returns `true` if the main tier is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Records one touch for `key` in the history tier and returns the
    /// updated count. A history entry displaced by this touch takes its
    /// stashed value with it.
    fn touch(&mut self, key: &K) -> u64 {
        let count = self.history.peek(key).copied().unwrap_or(0) + 1;
        if let Some((displaced, _)) = self.history.put(key.clone(), count) {
            self.pending.remove(&displaced);
        }
        count
    }

    /// Moves `key` into the main tier after it earned admission.
    fn admit(&mut self, key: K, value: V) {
        if self.main.put(key, value).is_some() {
            self.metrics.core.record_eviction();
        }
        self.metrics.core.record_insertion();
        self.metrics.record_admission();
    }

    /// Returns a reference to the value if `key` is resident (or earns
    /// residency on this call).
    ///
    /// Every lookup counts as a touch in the history bookkeeping, whether
    /// or not the key is already resident.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let count = self.touch(key);

        if self.main.peek(key).is_some() {
            self.metrics.core.record_hit();
            return self.main.get(key);
        }

        // The touch that reaches K promotes the stashed value and the
        // lookup itself is served from it.
        if count >= self.promotion_threshold {
            if let Some(value) = self.pending.remove(key) {
                self.history.remove(key);
                self.admit(key.clone(), value);
                self.metrics.core.record_hit();
                return self.main.peek(key);
            }
        }

        self.metrics.core.record_miss();
        None
    }

    /// Inserts a key-value pair.
    ///
    /// A key already resident in the main tier is overwritten in place.
    /// Otherwise the write counts as a touch: the value is stashed (the
    /// latest write wins) and the key is admitted once its touch count
    /// reaches K.
    pub fn put(&mut self, key: K, value: V) {
        if self.main.peek(&key).is_some() {
            self.main.put(key, value);
            return;
        }

        let count = self.touch(&key);
        if count >= self.promotion_threshold {
            self.history.remove(&key);
            self.pending.remove(&key);
            self.admit(key, value);
        } else {
            self.pending.insert(key, value);
        }
    }

    /// Returns `true` if `key` is resident in the main tier.
    ///
    /// Keys still earning admission in the history tier do not count.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.main.peek(key).is_some()
    }

    /// Clears both tiers and all stashed values.
    pub fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
        self.pending.clear();
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> core::fmt::Debug for LruKCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruKCache")
            .field("capacity", &self.main.cap())
            .field("len", &self.main.len())
            .field("history_len", &self.history.len())
            .field("promotion_threshold", &self.promotion_threshold)
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for LruKCache<K, V, S> {
    fn put(&mut self, key: K, value: V) {
        LruKCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        LruKCache::get(self, key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        LruKCache::contains(self, key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for LruKCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_k2(cap: usize) -> LruKCache<&'static str, i32> {
        LruKCache::new(
            NonZeroUsize::new(cap).unwrap(),
            NonZeroUsize::new(cap * 2).unwrap(),
            NonZeroUsize::new(2).unwrap(),
        )
    }

    #[test]
    fn test_lru_k_single_touch_does_not_admit() {
        let mut cache = cache_k2(2);
        cache.put("apple", 1);
        assert!(!cache.contains(&"apple"));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_lru_k_second_touch_admits() {
        let mut cache = cache_k2(2);
        cache.put("apple", 1);

        // The second touch reaches K=2 and the stashed value is served.
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert!(cache.contains(&"apple"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_k_double_put_admits_latest_value() {
        let mut cache = cache_k2(2);
        cache.put("apple", 1);
        cache.put("apple", 2);
        assert!(cache.contains(&"apple"));
        assert_eq!(cache.get(&"apple"), Some(&2));
    }

    #[test]
    fn test_lru_k_resident_key_overwrites_directly() {
        let mut cache = cache_k2(2);
        cache.put("apple", 1);
        cache.put("apple", 2);

        // Once resident, a put overwrites without further admission steps.
        cache.put("apple", 3);
        assert_eq!(cache.get(&"apple"), Some(&3));
    }

    #[test]
    fn test_lru_k_scan_does_not_displace_hot_data() {
        let mut cache: LruKCache<i32, i32> = LruKCache::new(
            NonZeroUsize::new(2).unwrap(),
            NonZeroUsize::new(4).unwrap(),
            NonZeroUsize::new(2).unwrap(),
        );
        cache.put(1000, 1);
        cache.put(1000, 1);
        cache.put(1001, 2);
        cache.put(1001, 2);
        assert_eq!(cache.len(), 2);

        // A one-touch scan over many cold keys never enters the main tier.
        for i in 0..100 {
            cache.put(i, i);
        }
        assert!(cache.contains(&1000));
        assert!(cache.contains(&1001));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_k_main_tier_evicts_lru_order() {
        let mut cache = cache_k2(2);
        for key in ["a", "b", "c"] {
            cache.put(key, 0);
            cache.put(key, 0);
        }
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn test_lru_k_history_eviction_forgets_stashed_value() {
        let mut cache: LruKCache<i32, i32> = LruKCache::new(
            NonZeroUsize::new(4).unwrap(),
            NonZeroUsize::new(2).unwrap(),
            NonZeroUsize::new(2).unwrap(),
        );
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        // Key 1 fell out of the two-slot history tier, so its earlier
        // touch no longer counts toward admission.
        cache.put(1, 11);
        assert!(!cache.contains(&1));
        cache.put(1, 12);
        assert!(cache.contains(&1));
        assert_eq!(cache.get(&1), Some(&12));
    }

    #[test]
    fn test_lru_k_threshold_one_behaves_like_lru() {
        let one = NonZeroUsize::new(1).unwrap();
        let mut cache: LruKCache<&str, i32> =
            LruKCache::new(NonZeroUsize::new(2).unwrap(), NonZeroUsize::new(4).unwrap(), one);
        cache.put("a", 1);
        assert!(cache.contains(&"a"));
        cache.put("b", 2);
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lru_k_get_touch_counts_toward_admission() {
        let mut cache: LruKCache<&str, i32> = LruKCache::new(
            NonZeroUsize::new(2).unwrap(),
            NonZeroUsize::new(4).unwrap(),
            NonZeroUsize::new(3).unwrap(),
        );
        // Misses still count as touches.
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.get(&"apple"), None);

        // Third touch carries a value and reaches K=3.
        cache.put("apple", 1);
        assert!(cache.contains(&"apple"));
    }

    #[test]
    fn test_lru_k_clear() {
        let mut cache = cache_k2(2);
        cache.put("a", 1);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&"a"));

        // Admission state restarts from zero touches.
        cache.put("b", 3);
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn test_lru_k_metrics_track_admissions() {
        let mut cache = cache_k2(2);
        cache.put("a", 1);
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"missing");

        let metrics = cache.metrics();
        assert_eq!(metrics.get("admissions"), Some(&1.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "LRU-K");
    }
}
