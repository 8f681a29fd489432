//! Adaptive Replacement Cache (ARC) Implementation
//!
//! ARC blends recency and frequency disciplines. It composes two
//! sub-parts, an LRU-like recency part and an LFU-like frequency part,
//! each with a mutable capacity and a bounded ghost list of recently
//! evicted keys. The two capacities always sum to the configured total.
//!
//! # Adaptation
//!
//! Every `put` and `get` first checks the accessed key against both ghost
//! lists. A hit in the recency ghost list means the key would still have
//! been resident with more recency capacity, so one capacity slot migrates
//! from the frequency part to the recency part; a frequency ghost hit
//! migrates capacity the other way. Workloads that lean on recency or on
//! frequency therefore pull the partition toward the discipline that
//! serves them better, with no tuning.
//!
//! # Hot promotion
//!
//! New writes enter the recency part. Each recency entry carries an access
//! counter; when it reaches the configured transform threshold, the value
//! is also written into the frequency part, where repeated use keeps it
//! alive long after recency alone would have dropped it.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Wrap it in a `Mutex` for
//! shared access; the two sub-parts are only ever touched one at a time
//! within a single operation.

extern crate alloc;

mod ghost;
mod lfu_part;
mod lru_part;

use crate::config::ArcCacheConfig;
use crate::metrics::{ArcCacheMetrics, CacheMetrics};
use crate::policy::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use lfu_part::ArcLfuPart;
use lru_part::ArcLruPart;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Access count at which a recency entry is copied into the frequency
/// part, used by [`ArcCache::new`].
pub const DEFAULT_TRANSFORM_THRESHOLD: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(v) => v,
    None => unreachable!(),
};

/// Outcome of an insert into one sub-part.
pub(crate) struct PartPut {
    pub(crate) inserted: bool,
    pub(crate) evicted: bool,
}

/// Which ghost list, if any, remembered the accessed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GhostHit {
    None,
    Recency,
    Frequency,
}

/// An implementation of an Adaptive Replacement Cache (ARC).
///
/// The cache has a fixed total capacity, dynamically partitioned between
/// a recency-tracking sub-part and a frequency-tracking sub-part based on
/// ghost-list hits. Values must be `Clone` because hot entries are kept
/// in both sub-parts at once.
///
/// # Examples
///
/// ```
/// use evict_rs::ArcCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = ArcCache::new(NonZeroUsize::new(4).unwrap());
///
/// cache.put("apple", 1);
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // The second access promoted "apple" into the frequency part, so it
/// // survives recency evictions from here on.
/// assert_eq!(cache.get(&"apple"), Some(1));
/// ```
pub struct ArcCache<K, V, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,
    recency: ArcLruPart<K, V, S>,
    frequency: ArcLfuPart<K, V, S>,
    metrics: ArcCacheMetrics,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default + Clone> ArcCache<K, V, S> {
    /// Creates an ARC cache from a configuration with an optional hasher.
    ///
    /// Passing `None` uses the default hash builder. The total capacity is
    /// split evenly between the two sub-parts, recency part first when the
    /// total is odd.
    pub fn init(config: ArcCacheConfig, hasher: Option<S>) -> Self {
        let hash_builder = hasher.unwrap_or_default();
        let total = config.capacity.get();
        let recency_capacity = total.div_ceil(2);
        let frequency_capacity = total - recency_capacity;
        ArcCache {
            capacity: config.capacity,
            recency: ArcLruPart::with_hasher(
                recency_capacity,
                config.transform_threshold.get() as u64,
                hash_builder.clone(),
            ),
            frequency: ArcLfuPart::with_hasher(frequency_capacity, hash_builder),
            metrics: ArcCacheMetrics::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> ArcCache<K, V> {
    /// Creates an ARC cache with the specified total capacity and the
    /// default transform threshold ([`DEFAULT_TRANSFORM_THRESHOLD`]).
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::init(
            ArcCacheConfig {
                capacity,
                transform_threshold: DEFAULT_TRANSFORM_THRESHOLD,
            },
            None,
        )
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> ArcCache<K, V, S> {
    /// Returns the fixed total capacity.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the number of resident entries across both sub-parts.
    ///
    /// A hot key held by both sub-parts counts once per copy, matching the
    /// slots it occupies.
    #[inline]
    pub fn len(&self) -> usize {
        self.recency.len() + self.frequency.len()
    }

    /// Returns `true` if no entry is resident in either sub-part.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.recency.len() == 0 && self.frequency.len() == 0
    }

    /// Current capacity of the recency sub-part (`p` in ARC terms).
    #[inline]
    pub fn recency_capacity(&self) -> usize {
        self.recency.capacity()
    }

    /// Current capacity of the frequency sub-part (total minus `p`).
    #[inline]
    pub fn frequency_capacity(&self) -> usize {
        self.frequency.capacity()
    }

    /// Inserts a key-value pair.
    ///
    /// Keys tracked by the frequency part are written through to both
    /// sub-parts so their frequency history survives the overwrite; all
    /// other writes enter the recency part only.
    pub fn put(&mut self, key: K, value: V) {
        self.rebalance(&key);

        if self.frequency.contains(&key) {
            let recency_result = self.recency.put(key.clone(), value.clone());
            let frequency_result = self.frequency.put(key, value);
            self.record_part_put(recency_result);
            if frequency_result.evicted {
                self.metrics.core.record_eviction();
            }
        } else {
            let result = self.recency.put(key, value);
            self.record_part_put(result);
        }
    }

    /// Looks up `key`, adapting the capacity partition on ghost hits.
    ///
    /// Recency hits bump the entry's access counter and promote it into
    /// the frequency part at the transform threshold. A key that was just
    /// recalled from the recency ghost list and is still held by the
    /// frequency part re-enters the recency part as part of this call.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let ghost = self.rebalance(key);

        if let Some((value, promote)) = self.recency.get(key) {
            if promote {
                let result = self.frequency.put(key.clone(), value.clone());
                if result.evicted {
                    self.metrics.core.record_eviction();
                }
                self.metrics.record_hot_promotion();
            }
            self.metrics.core.record_hit();
            return Some(value);
        }

        if let Some(value) = self.frequency.get(key) {
            if ghost == GhostHit::Recency {
                // The ghost hit proves this key wants recency tracking
                // again; reinstate it from the frequency copy.
                let result = self.recency.put(key.clone(), value.clone());
                self.record_part_put(result);
            }
            self.metrics.core.record_hit();
            return Some(value);
        }

        self.metrics.core.record_miss();
        None
    }

    /// Returns `true` if `key` is resident in either sub-part, without
    /// touching ordering, counters or ghost state.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.recency.contains(key) || self.frequency.contains(key)
    }

    /// Clears both sub-parts and their ghost lists. The current capacity
    /// partition is kept.
    pub fn clear(&mut self) {
        self.recency.clear();
        self.frequency.clear();
    }

    /// Consumes ghost entries for `key` and migrates one capacity slot
    /// toward the sub-part whose ghost remembered it.
    ///
    /// Capacity only moves when the donating sub-part can actually shrink,
    /// so the two capacities always sum to the configured total.
    fn rebalance(&mut self, key: &K) -> GhostHit {
        if self.recency.check_ghost(key) {
            self.metrics.record_recency_ghost_hit();
            if self.frequency.decrease_capacity() {
                self.recency.increase_capacity();
                self.metrics.record_capacity_transfer();
            }
            return GhostHit::Recency;
        }
        if self.frequency.check_ghost(key) {
            self.metrics.record_frequency_ghost_hit();
            if self.recency.decrease_capacity() {
                self.frequency.increase_capacity();
                self.metrics.record_capacity_transfer();
            }
            return GhostHit::Frequency;
        }
        GhostHit::None
    }

    fn record_part_put(&mut self, result: PartPut) {
        if result.inserted {
            self.metrics.core.record_insertion();
        }
        if result.evicted {
            self.metrics.core.record_eviction();
        }
    }

    /// Whether `key` is currently resident in the recency sub-part.
    /// Test support.
    #[cfg(test)]
    fn resident_in_recency(&self, key: &K) -> bool {
        self.recency.contains(key)
    }
}

impl<K, V, S> core::fmt::Debug for ArcCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("recency", &self.recency)
            .field("frequency", &self.frequency)
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> CachePolicy<K, V> for ArcCache<K, V, S> {
    fn put(&mut self, key: K, value: V) {
        ArcCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ArcCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ArcCache::contains(self, key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for ArcCache<K, V, S> {
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

    fn cache(total: usize) -> ArcCache<&'static str, i32> {
        ArcCache::new(NonZeroUsize::new(total).unwrap())
    }

    #[test]
    fn test_arc_round_trip() {
        let mut c = cache(4);
        c.put("apple", 1);
        assert_eq!(c.get(&"apple"), Some(1));
        assert_eq!(c.get(&"missing"), None);
    }

    #[test]
    fn test_arc_initial_capacity_split() {
        let c = cache(4);
        assert_eq!(c.recency_capacity(), 2);
        assert_eq!(c.frequency_capacity(), 2);

        let odd: ArcCache<&str, i32> = ArcCache::new(NonZeroUsize::new(5).unwrap());
        assert_eq!(odd.recency_capacity(), 3);
        assert_eq!(odd.frequency_capacity(), 2);
    }

    #[test]
    fn test_arc_hot_promotion() {
        let mut c = cache(4);
        c.put("k", 10);

        // Insert counted one access; this get reaches the threshold of 2.
        assert_eq!(c.get(&"k"), Some(10));
        assert_eq!(c.metrics().get("hot_promotions"), Some(&1.0));
    }

    #[test]
    fn test_arc_recency_ghost_recall_grows_p_and_rehydrates() {
        let mut c = cache(4);
        c.put("k", 10);
        c.get(&"k"); // promoted into the frequency part

        // Push "k" out of the recency part.
        c.put("a", 1);
        c.put("b", 2);
        assert!(!c.resident_in_recency(&"k"));

        // The very next access is a hit, grows p by one and reinstates
        // "k" in the recency part.
        assert_eq!(c.get(&"k"), Some(10));
        assert_eq!(c.recency_capacity(), 3);
        assert_eq!(c.frequency_capacity(), 1);
        assert!(c.resident_in_recency(&"k"));

        let metrics = c.metrics();
        assert_eq!(metrics.get("recency_ghost_hits"), Some(&1.0));
        assert_eq!(metrics.get("capacity_transfers"), Some(&1.0));
    }

    #[test]
    fn test_arc_frequency_ghost_shrinks_p() {
        let mut c: ArcCache<&str, i32> = ArcCache::init(
            ArcCacheConfig {
                capacity: NonZeroUsize::new(4).unwrap(),
                transform_threshold: NonZeroUsize::new(1).unwrap(),
            },
            None,
        );

        // Promote five keys through the frequency part; each new promotion
        // evicts the oldest frequency entry into the frequency ghost list,
        // and enough recency churn pushes x1 out of the recency ghosts.
        for (key, value) in [("x1", 1), ("x2", 2), ("x3", 3), ("x4", 4)] {
            c.put(key, value);
            c.get(&key);
        }
        c.put("x5", 5);
        assert!(!c.contains(&"x1"));

        // x1 is now remembered only by the frequency ghost list.
        assert_eq!(c.get(&"x1"), None);
        assert_eq!(c.frequency_capacity(), 3);
        assert_eq!(c.recency_capacity(), 1);
        assert_eq!(c.metrics().get("frequency_ghost_hits"), Some(&1.0));
    }

    #[test]
    fn test_arc_write_through_keeps_frequency_history() {
        let mut c = cache(4);
        c.put("k", 1);
        c.get(&"k"); // promoted

        // Overwrite while frequency-tracked: both copies update.
        c.put("k", 2);
        assert_eq!(c.get(&"k"), Some(2));

        // Evict from recency and recall: the frequency copy has the new
        // value.
        c.put("a", 1);
        c.put("b", 2);
        assert_eq!(c.get(&"k"), Some(2));
    }

    #[test]
    fn test_arc_capacity_partition_always_sums_to_total() {
        let mut c: ArcCache<i32, i32> = ArcCache::new(NonZeroUsize::new(6).unwrap());
        for i in 0..200 {
            c.put(i % 17, i);
            c.get(&(i % 5));
        }
        assert_eq!(c.recency_capacity() + c.frequency_capacity(), 6);
    }

    #[test]
    fn test_arc_resident_count_never_exceeds_capacity() {
        let mut c: ArcCache<i32, i32> = ArcCache::new(NonZeroUsize::new(6).unwrap());
        for i in 0..300 {
            c.put(i % 23, i);
            c.get(&(i % 7));
            assert!(c.len() <= 6);
        }
    }

    #[test]
    fn test_arc_clear() {
        let mut c = cache(4);
        c.put("a", 1);
        c.get(&"a");
        c.put("b", 2);
        c.clear();
        assert!(c.is_empty());
        assert!(!c.contains(&"a"));
        assert_eq!(c.get(&"a"), None);

        c.put("c", 3);
        assert_eq!(c.get(&"c"), Some(3));
    }

    #[test]
    fn test_arc_contains_does_not_mutate() {
        let mut c = cache(4);
        c.put("a", 1);
        assert!(c.contains(&"a"));
        assert!(!c.contains(&"b"));

        // contains must not count as the promoting access.
        assert_eq!(c.metrics().get("hot_promotions"), Some(&0.0));
    }
}
