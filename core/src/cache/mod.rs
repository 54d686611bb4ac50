//! Banked, set-associative cache shared by both hierarchy tiers.
//!
//! Tier-1 and tier-2 are not separate types: both are instances of one
//! generic `BankedCache` (an array of [`LruSet`]s plus per-bank hit/miss
//! counters) parameterised only by bank count and per-bank capacity. The
//! scheduler (`crate::sim`) is responsible for computing which bank a line
//! key routes to (`crate::common::bank`) and for driving `probe`/`touch`/
//! `admit` in the right order; `BankedCache` itself knows nothing about
//! cycles, latency, or in-flight fills.
//!
//! `LruSet` is the only eviction policy `BankedCache` is built against. A
//! `ReplacementPolicy` trait in place of the concrete `LruSet` would let a
//! bank select FIFO/LFU/random/etc at construction time the way
//! `Prefetcher` lets the scheduler select a prefetch strategy; this crate
//! does not expose that seam (LRU is the only policy in scope), but the
//! shape would mirror `Prefetcher` exactly if a second policy were ever
//! needed.

pub mod lru_set;

pub use lru_set::LruSet;

use crate::common::addr::LineKey;

/// Outcome of a non-mutating cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The line key is resident in its bank.
    Hit,
    /// The line key is not resident in its bank.
    Miss,
}

impl Probe {
    /// Returns `true` if this is a [`Probe::Hit`].
    #[inline]
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// An array of per-bank [`LruSet`]s with per-bank hit/miss counters.
///
/// Used for both tier-1 and tier-2; which tier a given instance represents
/// is purely a matter of which bank-count and per-bank-capacity it was
/// constructed with.
#[derive(Debug)]
pub struct BankedCache {
    banks: Vec<LruSet>,
    bank_hits: Vec<u64>,
    bank_misses: Vec<u64>,
}

impl BankedCache {
    /// Creates a cache with `num_banks` banks, each holding up to
    /// `capacity_per_bank` resident line keys.
    #[must_use]
    pub fn new(num_banks: usize, capacity_per_bank: usize) -> Self {
        debug_assert!(num_banks > 0);
        Self {
            banks: (0..num_banks).map(|_| LruSet::new(capacity_per_bank)).collect(),
            bank_hits: vec![0; num_banks],
            bank_misses: vec![0; num_banks],
        }
    }

    /// Returns the number of banks.
    #[inline]
    #[must_use]
    pub fn num_banks(&self) -> usize {
        self.banks.len()
    }

    /// Non-mutating lookup of `key` in the given bank.
    #[must_use]
    pub fn probe(&self, key: LineKey, bank: usize) -> Probe {
        if self.banks[bank].contains(key) {
            Probe::Hit
        } else {
            Probe::Miss
        }
    }

    /// Moves a resident key to the most-recently-used position in its bank.
    ///
    /// Requires `probe(key, bank).is_hit()`.
    pub fn touch(&mut self, key: LineKey, bank: usize) {
        self.banks[bank].touch(key);
    }

    /// Admits `key` into the given bank, evicting the bank's LRU key if full.
    ///
    /// Requires `!probe(key, bank).is_hit()`.
    pub fn admit(&mut self, key: LineKey, bank: usize) -> Option<LineKey> {
        self.banks[bank].insert(key)
    }

    /// Admits `key` into the given bank the way [`Self::admit`] does, except
    /// a resident key for which `is_protected` returns `true` is never
    /// chosen as the eviction victim even if it is the bank's LRU entry; the
    /// next-least-recently-used unprotected key is evicted instead.
    ///
    /// Returns `Ok(None)` if no eviction was needed, `Ok(Some(victim))` if
    /// one was, or `Err(())` if every resident key in the bank is protected
    /// (no legal victim exists).
    ///
    /// Requires `!probe(key, bank).is_hit()`.
    pub fn admit_guarded<F>(
        &mut self,
        key: LineKey,
        bank: usize,
        is_protected: F,
    ) -> Result<Option<LineKey>, ()>
    where
        F: Fn(LineKey) -> bool,
    {
        let set = &mut self.banks[bank];
        if set.len() < set.capacity() {
            return Ok(set.insert(key));
        }
        let Some(victim) = set.lru_iter().find(|&k| !is_protected(k)) else {
            return Err(());
        };
        set.remove(victim);
        let displaced = set.insert(key);
        debug_assert!(displaced.is_none(), "freed slot but insert still evicted");
        Ok(Some(victim))
    }

    /// Records a hit against the given bank's counter.
    pub fn record_hit(&mut self, bank: usize) {
        self.bank_hits[bank] += 1;
    }

    /// Records a miss against the given bank's counter.
    pub fn record_miss(&mut self, bank: usize) {
        self.bank_misses[bank] += 1;
    }

    /// Returns the hit count recorded for a single bank.
    #[inline]
    #[must_use]
    pub fn bank_hits(&self, bank: usize) -> u64 {
        self.bank_hits[bank]
    }

    /// Returns the miss count recorded for a single bank.
    #[inline]
    #[must_use]
    pub fn bank_misses(&self, bank: usize) -> u64 {
        self.bank_misses[bank]
    }

    /// Returns the number of resident keys in the given bank.
    #[inline]
    #[must_use]
    pub fn len(&self, bank: usize) -> usize {
        self.banks[bank].len()
    }
}
