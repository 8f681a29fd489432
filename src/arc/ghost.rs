//! Bounded ghost list shared by both ARC sub-parts.
//!
//! A ghost list remembers the keys (never the values) most recently
//! evicted from a sub-part's main structure, in arrival order. A lookup
//! that lands in a ghost list is ARC's learning signal: the key would
//! still have been resident had this sub-part owned more capacity.

use crate::list::{Handle, List};
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// FIFO record of recently evicted keys with O(1) membership.
///
/// Capacity mirrors the owning sub-part's current main capacity and is
/// adjusted through [`set_capacity`](GhostList::set_capacity) whenever
/// capacity migrates between the sub-parts.
pub(super) struct GhostList<K, S> {
    map: HashMap<K, Handle, S>,
    /// Arrival order; head = oldest ghost, first to be forgotten.
    list: List<K>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, S: BuildHasher> GhostList<K, S> {
    pub(super) fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        GhostList {
            map: HashMap::with_capacity_and_hasher(capacity.next_power_of_two(), hash_builder),
            list: List::with_capacity(capacity),
            capacity,
        }
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.map.len()
    }

    /// Consumes a ghost entry. Returns `true` if `key` was remembered.
    pub(super) fn remove(&mut self, key: &K) -> bool {
        match self.map.remove(key) {
            Some(handle) => {
                self.list.remove(handle);
                true
            }
            None => false,
        }
    }

    /// Remembers `key` as freshly evicted, forgetting the oldest ghosts
    /// to stay within capacity.
    pub(super) fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }
        if let Some(&handle) = self.map.get(&key) {
            self.list.move_to_back(handle);
            return;
        }
        while self.list.len() >= self.capacity {
            if let Some(old) = self.list.pop_front() {
                self.map.remove(&old);
            }
        }
        let handle = self.list.push_back(key.clone());
        self.map.insert(key, handle);
    }

    /// Adjusts the bound, forgetting oldest ghosts if it shrank.
    pub(super) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.list.len() > self.capacity {
            if let Some(old) = self.list.pop_front() {
                self.map.remove(&old);
            }
        }
    }

    /// Forgets every ghost.
    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, S> core::fmt::Debug for GhostList<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GhostList")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
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

    fn ghosts(capacity: usize) -> GhostList<&'static str, DefaultHashBuilder> {
        GhostList::with_hasher(capacity, DefaultHashBuilder::default())
    }

    #[test]
    fn test_ghost_record_and_remove() {
        let mut g = ghosts(2);
        g.record("a");
        assert!(g.remove(&"a"));
        assert!(!g.remove(&"a"));
    }

    #[test]
    fn test_ghost_forgets_oldest_at_capacity() {
        let mut g = ghosts(2);
        g.record("a");
        g.record("b");
        g.record("c");
        assert!(!g.remove(&"a"));
        assert!(g.remove(&"b"));
        assert!(g.remove(&"c"));
    }

    #[test]
    fn test_ghost_shrinking_capacity_trims_oldest() {
        let mut g = ghosts(3);
        g.record("a");
        g.record("b");
        g.record("c");
        g.set_capacity(1);
        assert_eq!(g.len(), 1);
        assert!(g.remove(&"c"));
    }

    #[test]
    fn test_ghost_zero_capacity_records_nothing() {
        let mut g = ghosts(0);
        g.record("a");
        assert_eq!(g.len(), 0);
        assert!(!g.remove(&"a"));
    }
}
