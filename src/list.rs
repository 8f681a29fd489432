//! Slot-arena ordered list used by every eviction engine.
//!
//! This module provides the ordered-collection primitive shared by the LRU
//! recency list, the LFU frequency buckets and the four internal ARC lists.
//! It is a doubly linked sequence stored in a slot arena: entries live in a
//! `Vec`, links are plain indices, and reclaimed slots are recycled through
//! an explicit free list. Sentinel head and tail slots keep the link
//! surgery branch-free at the boundaries.
//!
//! Compared to a pointer-based intrusive list this design has no dangling
//! links and no double ownership to reason about: the arena owns every slot,
//! handles are just indices, and the whole module is safe code.
//!
//! All structural operations are O(1): append at the tail, remove by handle,
//! move to the tail, pop the head.
//!
//! **Note**: This module is internal infrastructure. Handles are only
//! meaningful for the list that issued them, and a handle must not be used
//! after the entry it names has been removed. The engines uphold this by
//! keeping their key→handle maps in lockstep with the lists.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Arena index of the head sentinel.
const HEAD: usize = 0;
/// Arena index of the tail sentinel.
const TAIL: usize = 1;

/// Opaque handle to an entry in a [`List`].
///
/// A handle stays valid until the entry it names is removed from the list.
/// It is only meaningful for the list that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(usize);

/// One arena slot: the stored value plus its neighbour links.
///
/// Sentinels and free slots hold `None`; occupied slots hold `Some`.
struct Slot<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked sequence backed by a slot arena.
///
/// The list orders entries from head (oldest / first eviction candidate) to
/// tail (newest / most recently used). Engines decide what the order means:
/// recency for LRU, insertion order within a frequency class for LFU
/// buckets, arrival order for ARC ghost lists.
pub(crate) struct List<T> {
    slots: Vec<Slot<T>>,
    /// Indices of reclaimed slots, reused before the arena grows.
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        let slots = alloc::vec![
            Slot {
                val: None,
                prev: HEAD,
                next: TAIL,
            },
            Slot {
                val: None,
                prev: HEAD,
                next: TAIL,
            },
        ];
        List {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty list with arena space reserved for `cap` entries.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        let mut list = List::new();
        list.slots.reserve(cap);
        list
    }

    /// Returns the current number of entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no entries.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unlinks slot `idx` from its neighbours. The slot itself is untouched.
    #[inline]
    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    /// Links slot `idx` immediately before the tail sentinel.
    #[inline]
    fn link_back(&mut self, idx: usize) {
        let last = self.slots[TAIL].prev;
        self.slots[idx].prev = last;
        self.slots[idx].next = TAIL;
        self.slots[last].next = idx;
        self.slots[TAIL].prev = idx;
    }

    /// Appends a value at the tail and returns its handle.
    pub(crate) fn push_back(&mut self, val: T) -> Handle {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].val = Some(val);
                idx
            }
            None => {
                self.slots.push(Slot {
                    val: Some(val),
                    prev: HEAD,
                    next: TAIL,
                });
                self.slots.len() - 1
            }
        };
        self.link_back(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Removes and returns the head entry (the first eviction candidate).
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let idx = self.slots[HEAD].next;
        if idx == TAIL {
            return None;
        }
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        self.slots[idx].val.take()
    }

    /// Returns a reference to the head entry without removing it.
    pub(crate) fn front(&self) -> Option<&T> {
        let idx = self.slots[HEAD].next;
        if idx == TAIL {
            return None;
        }
        self.slots[idx].val.as_ref()
    }

    /// Removes the entry named by `handle`, returning its value.
    ///
    /// Returns `None` if the handle names a slot that is no longer occupied.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        let idx = handle.0;
        if idx < 2 || idx >= self.slots.len() || self.slots[idx].val.is_none() {
            return None;
        }
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        self.slots[idx].val.take()
    }

    /// Moves the entry named by `handle` to the tail (most recent position).
    pub(crate) fn move_to_back(&mut self, handle: Handle) {
        let idx = handle.0;
        if idx < 2 || idx >= self.slots.len() || self.slots[idx].val.is_none() {
            return;
        }
        if self.slots[TAIL].prev == idx {
            return;
        }
        self.unlink(idx);
        self.link_back(idx);
    }

    /// Returns a reference to the value named by `handle`.
    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0).and_then(|slot| slot.val.as_ref())
    }

    /// Returns a mutable reference to the value named by `handle`.
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .and_then(|slot| slot.val.as_mut())
    }

    /// Removes every entry, keeping the arena allocation.
    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("arena_slots", &self.slots.len())
            .finish()
    }
}
