//! The in-flight fill table: line keys currently being fetched from tier-2
//! into tier-1, with scheduled arrival cycles.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::common::addr::LineKey;

/// Why an in-flight fill was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Issued to satisfy a demand read (or write-allocate) that missed.
    Demand,
    /// Issued speculatively by the stream prefetcher.
    Prefetch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    ready_cycle: u64,
    origin: Origin,
}

/// Tracks line keys in flight from tier-2 to tier-1.
///
/// Backed by a `BinaryHeap<Reverse<(ready_cycle, seq, key)>>` for retirement
/// order plus a `HashMap<LineKey, Entry>` for O(1) membership and origin
/// lookup. `seq` is a monotonically increasing counter supplying the
/// insertion-order tie-break required when multiple fills share a
/// `ready_cycle`.
#[derive(Debug, Default)]
pub struct InFlightTable {
    entries: HashMap<LineKey, Entry>,
    order: BinaryHeap<Reverse<(u64, u64, LineKey)>>,
    next_seq: u64,
}

impl InFlightTable {
    /// Creates an empty in-flight table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` is currently in flight.
    #[inline]
    #[must_use]
    pub fn has(&self, key: LineKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Returns the origin of an in-flight key, if present.
    #[inline]
    #[must_use]
    pub fn origin(&self, key: LineKey) -> Option<Origin> {
        self.entries.get(&key).map(|e| e.origin)
    }

    /// Returns the scheduled arrival cycle of an in-flight key, if present.
    #[inline]
    #[must_use]
    pub fn ready_cycle(&self, key: LineKey) -> Option<u64> {
        self.entries.get(&key).map(|e| e.ready_cycle)
    }

    /// Marks an in-flight key as having been touched by a demand access
    /// before it retired, reclassifying it as useful for accounting.
    ///
    /// No-op if `key` is not in flight.
    pub fn mark_useful(&mut self, key: LineKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.origin = Origin::Demand;
        }
    }

    /// Registers a new in-flight fill.
    ///
    /// Requires `!has(key)`.
    pub fn insert(&mut self, key: LineKey, ready_cycle: u64, origin: Origin) {
        debug_assert!(!self.has(key), "line key already in flight");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(key, Entry { ready_cycle, origin });
        self.order.push(Reverse((ready_cycle, seq, key)));
    }

    /// Removes and returns every entry whose `ready_cycle <= current_cycle`,
    /// in ascending `ready_cycle` order with insertion-order tie-breaks.
    ///
    /// `mark_useful` changes an entry's origin but never its key or
    /// `ready_cycle`, so every heap entry corresponds to exactly one live
    /// table entry until it retires.
    pub fn retire_due(&mut self, current_cycle: u64) -> Vec<(LineKey, Origin)> {
        let mut retired = Vec::new();
        while let Some(&Reverse((ready_cycle, _, key))) = self.order.peek() {
            if ready_cycle > current_cycle {
                break;
            }
            self.order.pop();
            if let Some(entry) = self.entries.remove(&key) {
                retired.push((key, entry.origin));
            }
        }
        retired
    }

    /// Returns the latest scheduled arrival cycle among all in-flight
    /// entries, or `None` if the table is empty.
    ///
    /// Used to fast-forward the clock during end-of-trace drain, where
    /// nothing else advances it.
    #[must_use]
    pub fn max_ready_cycle(&self) -> Option<u64> {
        self.entries.values().map(|entry| entry.ready_cycle).max()
    }

    /// Returns the number of entries currently in flight.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are in flight.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
