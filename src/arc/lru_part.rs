//! Recency (LRU-like) sub-part of the ARC engine.
//!
//! Behaves like a plain LRU segment except that its capacity is mutable
//! (capacity migrates between the two ARC sub-parts) and evicted keys are
//! remembered in an attached ghost list. Each entry also carries an access
//! counter; once it reaches the transform threshold the composed engine
//! copies the entry into the frequency sub-part ("hot promotion").

use super::ghost::GhostList;
use super::PartPut;
use crate::list::{Handle, List};
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Resident entry: key, value and per-entry access counter.
type Entry<K, V> = (K, V, u64);

pub(super) struct ArcLruPart<K, V, S> {
    capacity: usize,
    transform_threshold: u64,
    map: HashMap<K, Handle, S>,
    /// Recency order; head = least recently used.
    list: List<Entry<K, V>>,
    ghost: GhostList<K, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> ArcLruPart<K, V, S> {
    pub(super) fn with_hasher(capacity: usize, transform_threshold: u64, hash_builder: S) -> Self {
        ArcLruPart {
            capacity,
            transform_threshold,
            map: HashMap::with_capacity_and_hasher(capacity.next_power_of_two(), hash_builder.clone()),
            list: List::with_capacity(capacity),
            ghost: GhostList::with_hasher(capacity, hash_builder),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ArcLruPart<K, V, S> {
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

    /// Inserts or overwrites `key`. An overwrite refreshes recency but
    /// keeps the access counter. Evictions land in the ghost list.
    pub(super) fn put(&mut self, key: K, value: V) -> PartPut {
        if self.capacity == 0 {
            return PartPut {
                inserted: false,
                evicted: false,
            };
        }
        if let Some(&handle) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(handle) {
                entry.1 = value;
            }
            self.list.move_to_back(handle);
            return PartPut {
                inserted: false,
                evicted: false,
            };
        }

        let mut evicted = false;
        if self.map.len() >= self.capacity {
            evicted = self.evict_oldest();
        }
        let handle = self.list.push_back((key.clone(), value, 1));
        self.map.insert(key, handle);
        PartPut {
            inserted: true,
            evicted,
        }
    }

    /// Looks up `key`, refreshing recency and bumping the access counter.
    ///
    /// Returns the value and whether the counter has reached the transform
    /// threshold, in which case the caller promotes the entry into the
    /// frequency sub-part.
    pub(super) fn get(&mut self, key: &K) -> Option<(V, bool)>
    where
        V: Clone,
    {
        let &handle = self.map.get(key)?;
        self.list.move_to_back(handle);
        let entry = self.list.get_mut(handle)?;
        entry.2 += 1;
        let promote = entry.2 >= self.transform_threshold;
        Some((entry.1.clone(), promote))
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
            self.evict_oldest();
        }
        self.capacity -= 1;
        self.ghost.set_capacity(self.capacity);
        true
    }

    /// Removes every entry and ghost, keeping the current capacity.
    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.ghost.clear();
    }

    fn evict_oldest(&mut self) -> bool {
        if let Some((key, _, _)) = self.list.pop_front() {
            self.map.remove(&key);
            self.ghost.record(key);
            true
        } else {
            false
        }
    }
}

impl<K, V, S> core::fmt::Debug for ArcLruPart<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcLruPart")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("transform_threshold", &self.transform_threshold)
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

    fn part(capacity: usize) -> ArcLruPart<&'static str, i32, DefaultHashBuilder> {
        ArcLruPart::with_hasher(capacity, 2, DefaultHashBuilder::default())
    }

    #[test]
    fn test_eviction_lands_in_ghost() {
        let mut p = part(1);
        p.put("a", 1);
        p.put("b", 2);
        assert!(!p.contains(&"a"));
        assert!(p.check_ghost(&"a"));
        assert!(!p.check_ghost(&"a"));
    }

    #[test]
    fn test_counter_reaches_transform_threshold() {
        let mut p = part(2);
        p.put("a", 1);
        assert_eq!(p.get(&"a"), Some((1, true)));
    }

    #[test]
    fn test_overwrite_keeps_access_counter() {
        let mut p = part(2);
        p.put("a", 1);
        p.put("a", 2);
        // Counter is still 1 from the initial insert; this get makes 2.
        assert_eq!(p.get(&"a"), Some((2, true)));
    }

    #[test]
    fn test_decrease_capacity_evicts_when_full() {
        let mut p = part(2);
        p.put("a", 1);
        p.put("b", 2);
        assert!(p.decrease_capacity());
        assert_eq!(p.capacity(), 1);
        assert_eq!(p.len(), 1);
        assert!(p.check_ghost(&"a"));
    }

    #[test]
    fn test_capacity_floor_is_one() {
        let mut p = part(2);
        assert!(p.decrease_capacity());
        assert!(!p.decrease_capacity());
        assert_eq!(p.capacity(), 1);
    }
}
