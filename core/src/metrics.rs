//! Metrics aggregation: running counters plus a read-latency series, with
//! derived rates and percentiles computed on demand.
//!
//! `Metrics` does not print or serialise a report — "plotting, report
//! printing, and result-file emission" are a caller's concern. What it
//! exposes is the stable set of counters and series a caller needs to build
//! one.

/// A snapshot of a simulation run's counters and per-read latency series.
///
/// All fields are `pub`: `Metrics` is a plain accumulator owned by the
/// scheduler during a run and handed to the caller, by value, once the run
/// completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Tier-1 hits.
    pub t1_hits: u64,
    /// Tier-1 misses.
    pub t1_misses: u64,
    /// Tier-2 hits (fills that retired into tier-1).
    pub t2_hits: u64,
    /// Tier-2 misses. Must stay zero in a well-designed run; a nonzero
    /// value indicates tier-2 capacity was undersized for the workload.
    pub t2_misses: u64,
    /// Number of write operations processed.
    pub write_count: u64,
    /// Cycles lost to tier-1 bank contention.
    pub bank_conflicts_t1: u64,
    /// Cycles lost to tier-2 bank contention.
    pub bank_conflicts_t2: u64,
    /// Prefetches successfully issued.
    pub prefetches_issued: u64,
    /// Prefetches consumed by a demand access before eviction.
    pub prefetches_useful: u64,
    /// Prefetches evicted before any demand access consumed them.
    pub prefetches_wasted: u64,
    /// The final cycle counter value when the run completed.
    pub total_cycles: u64,
    /// Per-read completion latencies, in cycles, in trace order.
    ///
    /// Stored in trace order rather than sorted order: the determinism
    /// contract requires comparing two independently produced `Metrics`
    /// values byte-for-byte in the order latencies were recorded, not in
    /// sorted order.
    read_latencies: Vec<u64>,
}

impl Metrics {
    /// Creates an all-zero metrics accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completion latency for one read. Writes never call this:
    /// they never contribute a latency sample.
    pub fn record_read_latency(&mut self, latency: u64) {
        self.read_latencies.push(latency);
    }

    /// Returns the recorded read latencies in trace order.
    #[inline]
    #[must_use]
    pub fn read_latencies(&self) -> &[u64] {
        &self.read_latencies
    }

    /// Tier-1 hit rate: `t1_hits / (t1_hits + t1_misses)`.
    ///
    /// Returns `0.0` if no tier-1 accesses occurred.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.t1_hits + self.t1_misses;
        if total == 0 {
            0.0
        } else {
            self.t1_hits as f64 / total as f64
        }
    }

    /// Prefetch accuracy: `prefetches_useful / prefetches_issued`.
    ///
    /// Returns `0.0` if no prefetches were issued.
    #[must_use]
    pub fn prefetch_accuracy(&self) -> f64 {
        if self.prefetches_issued == 0 {
            0.0
        } else {
            self.prefetches_useful as f64 / self.prefetches_issued as f64
        }
    }

    /// Prefetch coverage: `prefetches_useful / (t1_misses + prefetches_useful)`.
    ///
    /// Returns `0.0` if the denominator is zero.
    #[must_use]
    pub fn prefetch_coverage(&self) -> f64 {
        let denom = self.t1_misses + self.prefetches_useful;
        if denom == 0 {
            0.0
        } else {
            self.prefetches_useful as f64 / denom as f64
        }
    }

    /// Tier-1 bank-conflict rate: conflict cycles per read-and-write-allocate
    /// operation that reached tier-1.
    ///
    /// Returns `0.0` if no tier-1 accesses occurred.
    #[must_use]
    pub fn bank_conflict_rate_t1(&self) -> f64 {
        let total = self.t1_hits + self.t1_misses;
        if total == 0 {
            0.0
        } else {
            self.bank_conflicts_t1 as f64 / total as f64
        }
    }

    /// Tier-2 bank-conflict rate: conflict cycles per tier-2 access.
    ///
    /// Returns `0.0` if no tier-2 accesses occurred.
    #[must_use]
    pub fn bank_conflict_rate_t2(&self) -> f64 {
        let total = self.t2_hits + self.t2_misses;
        if total == 0 {
            0.0
        } else {
            self.bank_conflicts_t2 as f64 / total as f64
        }
    }

    /// Computes the `p`-th percentile (`0.0..=1.0`) of the read-latency
    /// series using linear interpolation on a sorted copy.
    ///
    /// Returns `None` if no read latencies have been recorded.
    #[must_use]
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.read_latencies.is_empty() {
            return None;
        }
        let mut sorted = self.read_latencies.clone();
        sorted.sort_unstable();

        let n = sorted.len();
        if n == 1 {
            return Some(sorted[0] as f64);
        }

        let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        if lower == upper {
            return Some(sorted[lower] as f64);
        }
        let frac = rank - lower as f64;
        let interpolated =
            sorted[lower] as f64 + frac * (sorted[upper] as f64 - sorted[lower] as f64);
        Some(interpolated)
    }

    /// The 50th percentile read latency.
    #[inline]
    #[must_use]
    pub fn p50(&self) -> Option<f64> {
        self.percentile(0.50)
    }

    /// The 90th percentile read latency.
    #[inline]
    #[must_use]
    pub fn p90(&self) -> Option<f64> {
        self.percentile(0.90)
    }

    /// The 99th percentile read latency.
    #[inline]
    #[must_use]
    pub fn p99(&self) -> Option<f64> {
        self.percentile(0.99)
    }

    /// The 99.9th percentile read latency.
    #[inline]
    #[must_use]
    pub fn p999(&self) -> Option<f64> {
        self.percentile(0.999)
    }
}
