//! Frequency (LFU-like) sub-part of the ARC engine.
//!
//! Behaves like the standalone LFU segment minus aging: entries live in
//! frequency buckets with FIFO tie-break and the lowest populated bucket
//! is tracked for eviction. Capacity is mutable and evicted keys are
//! remembered in an attached ghost list.

extern crate alloc;

use super::ghost::GhostList;
use super::PartPut;
use crate::list::{Handle, List};
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

pub(super) struct ArcLfuPart<K, V, S> {
    capacity: usize,
    /// key → (current frequency, handle into that frequency's bucket).
    map: HashMap<K, (u64, Handle), S>,
    /// frequency → entries holding exactly that frequency, oldest first.
    buckets: BTreeMap<u64, List<(K, V)>>,
    min_frequency: u64,
    ghost: GhostList<K, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcLfuPart<K, V, S> {
    pub(super) fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        ArcLfuPart {
            capacity,
            map: HashMap::with_capacity_and_hasher(capacity.next_power_of_two(), hash_builder.clone()),
            buckets: BTreeMap::new(),
            min_frequency: 1,
            ghost: GhostList::with_hasher(capacity, hash_builder),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ArcLfuPart<K, V, S> {
    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(super) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts or overwrites `key`. An overwrite counts as a use and bumps
    /// the frequency. Evictions land in the ghost list.
    pub(super) fn put(&mut self, key: K, value: V) -> PartPut {
        if self.capacity == 0 {
            return PartPut {
                inserted: false,
                evicted: false,
            };
        }
        if let Some(&(freq, handle)) = self.map.get(&key) {
            if let Some((_, v)) = self
                .buckets
                .get_mut(&freq)
                .and_then(|bucket| bucket.get_mut(handle))
            {
                *v = value;
            }
            self.bump(&key);
            return PartPut {
                inserted: false,
                evicted: false,
            };
        }

        let mut evicted = false;
        if self.map.len() >= self.capacity {
            evicted = self.evict_least_frequent();
        }
        let handle = self
            .buckets
            .entry(1)
            .or_default()
            .push_back((key.clone(), value));
        self.map.insert(key, (1, handle));
        self.min_frequency = 1;
        PartPut {
            inserted: true,
            evicted,
        }
    }

    /// Looks up `key`, bumping its frequency on a hit.
    pub(super) fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        if !self.map.contains_key(key) {
            return None;
        }
        self.bump(key);
        let &(freq, handle) = self.map.get(key)?;
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(handle))
            .map(|(_, v)| v.clone())
    }

    /// Consumes a ghost entry for `key` if one is remembered.
    #[inline]
    pub(super) fn check_ghost(&mut self, key: &K) -> bool {
        self.ghost.remove(key)
    }

    /// Grants this sub-part one more capacity slot.
    pub(super) fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.ghost.set_capacity(self.capacity);
    }

    /// Takes one capacity slot away, evicting into the ghost list first if
    /// the main structure is full. Refuses to shrink below one slot.
    pub(super) fn decrease_capacity(&mut self) -> bool {
        if self.capacity <= 1 {
            return false;
        }
        if self.map.len() >= self.capacity {
            self.evict_least_frequent();
        }
        self.capacity -= 1;
        self.ghost.set_capacity(self.capacity);
        true
    }

    /// Removes every entry and ghost, keeping the current capacity.
    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.min_frequency = 1;
        self.ghost.clear();
    }

    fn bump(&mut self, key: &K) {
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
            if self.min_frequency == freq {
                self.min_frequency = freq + 1;
            }
        }
        let new_freq = freq + 1;
        let map_key = entry.0.clone();
        let new_handle = self.buckets.entry(new_freq).or_default().push_back(entry);
        self.map.insert(map_key, (new_freq, new_handle));
    }

    fn evict_least_frequent(&mut self) -> bool {
        let freq = self.min_frequency;
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return false;
        };
        let Some((key, _)) = bucket.pop_front() else {
            return false;
        };
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            self.min_frequency = self.buckets.keys().next().copied().unwrap_or(1);
        }
        self.map.remove(&key);
        self.ghost.record(key);
        true
    }
}

impl<K, V, S> core::fmt::Debug for ArcLfuPart<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcLfuPart")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "hashbrown")]
    use hashbrown::DefaultHashBuilder;
    #[cfg(not(feature = "hashbrown"))]
    use std::collections::hash_map::RandomState as DefaultHashBuilder;

    fn part(capacity: usize) -> ArcLfuPart<&'static str, i32, DefaultHashBuilder> {
        ArcLfuPart::with_hasher(capacity, DefaultHashBuilder::default())
    }

    #[test]
    fn test_least_frequent_evicts_into_ghost() {
        let mut p = part(2);
        p.put("hot", 1);
        p.put("cold", 2);
        p.get(&"hot");

        p.put("new", 3);
        assert!(!p.contains(&"cold"));
        assert!(p.contains(&"hot"));
        assert!(p.check_ghost(&"cold"));
    }

    #[test]
    fn test_equal_frequencies_evict_fifo() {
        let mut p = part(2);
        p.put("first", 1);
        p.put("second", 2);
        p.put("third", 3);
        assert!(!p.contains(&"first"));
        assert!(p.contains(&"second"));
    }

    #[test]
    fn test_overwrite_bumps_frequency() {
        let mut p = part(2);
        p.put("a", 1);
        p.put("a", 2);
        p.put("b", 3);

        // "a" is at frequency 2, "b" at 1; "b" loses.
        p.put("c", 4);
        assert!(p.contains(&"a"));
        assert!(!p.contains(&"b"));
        assert_eq!(p.get(&"a"), Some(2));
    }

    #[test]
    fn test_decrease_capacity_evicts_when_full() {
        let mut p = part(2);
        p.put("a", 1);
        p.put("b", 2);
        p.get(&"b");
        assert!(p.decrease_capacity());
        assert_eq!(p.capacity(), 1);
        assert!(p.check_ghost(&"a"));
        assert!(p.contains(&"b"));
    }

    #[test]
    fn test_capacity_floor_is_one() {
        let mut p = part(3);
        assert!(p.decrease_capacity());
        assert!(p.decrease_capacity());
        assert!(!p.decrease_capacity());
        assert_eq!(p.capacity(), 1);
    }
}
