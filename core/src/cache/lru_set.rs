//! A fixed-capacity, strict-LRU set of line keys with O(1) amortised
//! `contains`/`touch`/`insert`/`evict`.
//!
//! # Representation
//!
//! An intrusive doubly linked list over a slab (`Vec<Node>`), with a
//! `HashMap<LineKey, usize>` from key to slab index and head/tail sentinels.
//! `touch`/`insert` unlink-and-relink the affected node at the head (MRU) in
//! O(1); eviction unlinks the tail (LRU) in O(1). A free list inside the
//! slab reuses vacated node slots so steady-state operation never grows the
//! backing `Vec` past its initial capacity.
//!
//! # Performance
//!
//! - **Time complexity:** O(1) amortised for every operation.
//! - **Space complexity:** O(capacity).
//! - **Eviction order:** strict LRU; ties are impossible because every
//!   `touch`/`insert` relinks its node to the head.

use std::collections::HashMap;

use crate::common::addr::LineKey;

const NIL: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Node {
    key: LineKey,
    prev: usize,
    next: usize,
}

/// A bounded set of line keys ordered by recency, evicting least-recently-used
/// on overflow.
#[derive(Debug)]
pub struct LruSet {
    capacity: usize,
    nodes: Vec<Node>,
    index: HashMap<LineKey, usize>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl LruSet {
    /// Creates an empty set bounded to `capacity` resident keys.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    /// Returns the number of resident keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the set holds no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the set's fixed capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` is currently resident.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: LineKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Moves a resident key to the most-recently-used position.
    ///
    /// Panics (via `debug_assert`) if `key` is not resident; callers must
    /// check `contains` first, matching the LRU set's documented
    /// precondition.
    pub fn touch(&mut self, key: LineKey) {
        let Some(&idx) = self.index.get(&key) else {
            debug_assert!(false, "touch called on a key that is not resident");
            return;
        };
        self.unlink(idx);
        self.push_front(idx);
    }

    /// Inserts a new key at the most-recently-used position.
    ///
    /// Requires `!contains(key)`. If the set is at capacity, evicts and
    /// returns the current least-recently-used key first.
    pub fn insert(&mut self, key: LineKey) -> Option<LineKey> {
        debug_assert!(!self.contains(key), "insert called on a resident key");

        if self.capacity == 0 {
            return Some(key);
        }

        let evicted = if self.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.alloc_node(key);
        self.index.insert(key, idx);
        self.push_front(idx);
        evicted
    }

    /// Iterates resident keys from least- to most-recently-used.
    ///
    /// Used by callers that need to evict around a protected subset (a key
    /// currently in flight must not be evicted from tier-1); plain `insert`
    /// always takes the strict LRU tail.
    pub fn lru_iter(&self) -> impl Iterator<Item = LineKey> + '_ {
        LruIter {
            nodes: &self.nodes,
            current: self.tail,
        }
    }

    /// Removes a specific resident key, wherever it sits in recency order.
    ///
    /// Returns `true` if `key` was resident.
    pub fn remove(&mut self, key: LineKey) -> bool {
        if let Some(idx) = self.index.remove(&key) {
            self.unlink(idx);
            self.free.push(idx);
            true
        } else {
            false
        }
    }

    /// Removes and returns the current least-recently-used key, if any.
    fn evict_lru(&mut self) -> Option<LineKey> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        let key = self.nodes[idx].key;
        self.unlink(idx);
        self.index.remove(&key);
        self.free.push(idx);
        Some(key)
    }

    fn alloc_node(&mut self, key: LineKey) -> usize {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = Node {
                key,
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(Node {
                key,
                prev: NIL,
                next: NIL,
            });
            idx
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

struct LruIter<'a> {
    nodes: &'a [Node],
    current: usize,
}

impl Iterator for LruIter<'_> {
    type Item = LineKey;

    fn next(&mut self) -> Option<LineKey> {
        if self.current == NIL {
            return None;
        }
        let node = self.nodes[self.current];
        self.current = node.prev;
        Some(node.key)
    }
}
