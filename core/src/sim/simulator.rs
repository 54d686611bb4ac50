//! The trace-driven scheduler: ties the two cache tiers, the in-flight fill
//! table, the bank busy maps, and the stream prefetcher into the single
//! `(config, trace) -> Metrics` pure function the crate exists to compute.
//!
//! `Simulator::run` consumes `self` and processes one [`Operation`] at a
//! time against a monotonically non-decreasing `current_cycle`. Each read or
//! write resolves through [`Simulator::resolve_access`] (shared between both
//! op kinds), then reads additionally feed the prefetcher. A final
//! [`Simulator::drain`] retires whatever is still in flight once the trace
//! is exhausted.

use std::collections::HashSet;

use crate::bankmap::BankBusyMap;
use crate::cache::{BankedCache, Probe};
use crate::common::addr::{ByteAddr, LineKey};
use crate::common::{Operation, OpKind, Trace, bank_t1, bank_t2, line_of};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::inflight::{InFlightTable, Origin};
use crate::metrics::Metrics;
use crate::prefetch::{Prefetcher, StreamPrefetcher};
use tracing::{debug, trace, warn};

/// The outcome of resolving one tier-1 access, shared by the read and write
/// paths.
enum AccessOutcome {
    /// The line was resident in tier-1. Carries the bank-conflict stall
    /// charged against this access's service time.
    Hit { conflict_stall: u64 },
    /// The line was not resident. Carries the cycle at which it will (or
    /// already did, if it was already in flight) become available.
    Miss { ready: u64 },
}

/// Owns every piece of simulator state and runs one trace to completion.
///
/// Constructed from a validated [`SimConfig`]; [`Simulator::run`] consumes
/// it and returns the accumulated [`Metrics`], so a `Simulator` is single-use.
pub struct Simulator {
    config: SimConfig,
    t1: BankedCache,
    t2: BankedCache,
    inflight: InFlightTable,
    bankmap: BankBusyMap,
    prefetcher: StreamPrefetcher,
    metrics: Metrics,
    current_cycle: u64,
    /// Tier-1 resident keys that arrived via prefetch and have not yet been
    /// touched by a demand read or write. Drives `prefetches_useful` (on
    /// touch) and `prefetches_wasted` (on eviction while still unconsumed).
    prefetch_unconsumed: HashSet<LineKey>,
    /// Every line key ever admitted into tier-2. Tier-2 has no lower tier to
    /// refill from, so the first touch of a key is always a compulsory fill
    /// (tracked here), and a later touch of a key this set already contains
    /// but tier-2 no longer holds is a genuine [`SimError::Tier2Miss`].
    seen_in_t2: HashSet<LineKey>,
}

impl Simulator {
    /// Builds a simulator from a configuration, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `config` fails
    /// [`SimConfig::validate`].
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let t1 = BankedCache::new(config.num_t1_banks, config.t1_capacity_per_bank());
        let t2 = BankedCache::new(config.num_t2_banks, config.t2_capacity_per_bank());
        let bankmap = BankBusyMap::new(config.num_t1_banks, config.num_t2_banks);
        let prefetcher = StreamPrefetcher::new(config.prefetch_trigger, config.prefetch_lookahead);
        Ok(Self {
            config,
            t1,
            t2,
            inflight: InFlightTable::new(),
            bankmap,
            prefetcher,
            metrics: Metrics::new(),
            current_cycle: 0,
            prefetch_unconsumed: HashSet::new(),
            seen_in_t2: HashSet::new(),
        })
    }

    /// Runs `trace` to completion, returning the accumulated [`Metrics`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOverflow`] if an operation's address
    /// cannot be normalised to a line key, [`SimError::Tier2Miss`] if a line
    /// key previously evicted from tier-2 is touched again,
    /// [`SimError::BudgetExceeded`] if `current_cycle` exceeds a configured
    /// `cycle_budget`, or [`SimError::InvariantViolation`] if tier-1
    /// admission cannot find a legal eviction victim.
    pub fn run(mut self, trace: &Trace) -> Result<Metrics, SimError> {
        for op in trace {
            self.process(op)?;
            self.check_budget()?;
        }
        self.drain()?;
        self.metrics.total_cycles = self.current_cycle;
        Ok(self.metrics)
    }

    fn process(&mut self, op: &Operation) -> Result<(), SimError> {
        match op.op_kind {
            OpKind::Read => self.process_read(op.byte_address),
            OpKind::Write => self.process_write(op.byte_address),
        }
    }

    fn process_read(&mut self, addr: ByteAddr) -> Result<(), SimError> {
        self.retire_ready_fills()?;
        let issue_cycle = self.current_cycle;
        let key = line_of(addr, self.config.line_bytes, self.config.address_bits)?;
        let b1 = bank_t1(key, self.config.num_t1_banks);
        let b2 = bank_t2(key, self.config.num_t1_banks, self.config.num_t2_banks);

        match self.resolve_access(key, b1, b2)? {
            AccessOutcome::Hit { conflict_stall } => {
                debug!(line_key = key.val(), bank = b1, "tier-1 read hit");
                self.metrics.t1_hits += 1;
                let latency = self.config.t1_latency + conflict_stall;
                self.metrics.record_read_latency(latency);
                self.current_cycle += 1;
            }
            AccessOutcome::Miss { ready } => {
                debug!(line_key = key.val(), bank = b1, ready, "tier-1 read miss");
                self.metrics.t1_misses += 1;
                let latency = (ready - issue_cycle) + self.config.t1_latency;
                self.metrics.record_read_latency(latency);
                self.current_cycle = self.current_cycle.max(ready + self.config.t1_latency);
                self.retire_ready_fills()?;
            }
        }

        self.feed_prefetcher(key)?;
        Ok(())
    }

    fn process_write(&mut self, addr: ByteAddr) -> Result<(), SimError> {
        self.retire_ready_fills()?;
        let key = line_of(addr, self.config.line_bytes, self.config.address_bits)?;
        let b1 = bank_t1(key, self.config.num_t1_banks);
        let b2 = bank_t2(key, self.config.num_t1_banks, self.config.num_t2_banks);

        match self.resolve_access(key, b1, b2)? {
            AccessOutcome::Hit { .. } => {
                self.current_cycle += 1;
            }
            AccessOutcome::Miss { ready } => {
                self.current_cycle = self.current_cycle.max(ready + self.config.t1_latency);
                self.retire_ready_fills()?;
            }
        }

        self.metrics.write_count += 1;
        Ok(())
    }

    /// Resolves one tier-1 access shared by reads and writes: a hit touches
    /// the line and charges tier-1 bank arbitration; a miss either rides an
    /// existing in-flight fill (reclassifying it as useful if it was a
    /// prefetch) or issues a new demand fetch.
    fn resolve_access(
        &mut self,
        key: LineKey,
        b1: usize,
        b2: usize,
    ) -> Result<AccessOutcome, SimError> {
        match self.t1.probe(key, b1) {
            Probe::Hit => {
                self.t1.touch(key, b1);
                if self.prefetch_unconsumed.remove(&key) {
                    self.metrics.prefetches_useful += 1;
                }
                let reservation = self.bankmap.reserve_t1(b1, self.current_cycle);
                self.metrics.bank_conflicts_t1 += reservation.conflict_stall;
                Ok(AccessOutcome::Hit {
                    conflict_stall: reservation.conflict_stall,
                })
            }
            Probe::Miss => {
                let ready = if let Some(existing_ready) = self.inflight.ready_cycle(key) {
                    if self.inflight.origin(key) == Some(Origin::Prefetch) {
                        self.inflight.mark_useful(key);
                        self.metrics.prefetches_useful += 1;
                    }
                    existing_ready
                } else {
                    self.issue_demand_fetch(key, b2)?
                };
                Ok(AccessOutcome::Miss { ready })
            }
        }
    }

    /// Issues a new demand fetch for `key`, charging tier-2 bank arbitration
    /// and registering the fill as in flight. Returns the cycle at which the
    /// fill completes (before adding `t1_latency` for the requester's own
    /// service time).
    fn issue_demand_fetch(&mut self, key: LineKey, b2: usize) -> Result<u64, SimError> {
        self.touch_tier2(key, b2)?;
        let reservation = self.bankmap.reserve_t2(b2, self.current_cycle);
        self.metrics.bank_conflicts_t2 += reservation.conflict_stall;
        let ready = reservation.start_cycle + self.config.t2_latency;
        self.inflight.insert(key, ready, Origin::Demand);
        Ok(ready)
    }

    /// Registers `key`'s presence in tier-2: a hit just updates recency; a
    /// first-ever touch is a compulsory fill from the idealised backing
    /// store and installs the key; a re-touch of a key this simulator has
    /// already evicted from tier-2 is a genuine capacity failure.
    fn touch_tier2(&mut self, key: LineKey, b2: usize) -> Result<(), SimError> {
        match self.t2.probe(key, b2) {
            Probe::Hit => {
                self.t2.touch(key, b2);
                self.metrics.t2_hits += 1;
            }
            Probe::Miss => {
                if self.seen_in_t2.contains(&key) {
                    self.metrics.t2_misses += 1;
                    return Err(SimError::Tier2Miss { line_key: key.val() });
                }
                self.t2.admit(key, b2);
                self.seen_in_t2.insert(key);
                self.metrics.t2_hits += 1;
            }
        }
        Ok(())
    }

    /// Feeds `key` to the stream prefetcher and issues whatever candidates
    /// it proposes, up to `prefetch_issue_width` successful issues.
    fn feed_prefetcher(&mut self, key: LineKey) -> Result<(), SimError> {
        let candidates = self.prefetcher.observe(key);
        let mut issued = 0usize;
        for candidate in candidates {
            if issued >= self.config.prefetch_issue_width {
                break;
            }
            let candidate_b1 = bank_t1(candidate, self.config.num_t1_banks);
            if self.t1.probe(candidate, candidate_b1).is_hit() || self.inflight.has(candidate) {
                continue;
            }
            let candidate_b2 = bank_t2(candidate, self.config.num_t1_banks, self.config.num_t2_banks);
            self.touch_tier2(candidate, candidate_b2)?;
            let reservation = self.bankmap.reserve_t2(candidate_b2, self.current_cycle);
            self.metrics.bank_conflicts_t2 += reservation.conflict_stall;
            let ready = reservation.start_cycle + self.config.t2_latency;
            self.inflight.insert(candidate, ready, Origin::Prefetch);
            trace!(line_key = candidate.val(), ready, "prefetch issued");
            self.metrics.prefetches_issued += 1;
            issued += 1;
        }
        Ok(())
    }

    /// Retires every in-flight fill whose `ready_cycle` has arrived,
    /// admitting each into tier-1 in ready-cycle/insertion order.
    fn retire_ready_fills(&mut self) -> Result<(), SimError> {
        let retired = self.inflight.retire_due(self.current_cycle);
        for (key, origin) in retired {
            self.complete_fill(key, origin)?;
        }
        Ok(())
    }

    /// Admits a retired fill into tier-1, protecting any key still in flight
    /// from eviction, and updates prefetch-usefulness bookkeeping for both
    /// the admitted key and whatever it displaced.
    fn complete_fill(&mut self, key: LineKey, origin: Origin) -> Result<(), SimError> {
        let bank = bank_t1(key, self.config.num_t1_banks);
        let evicted = {
            let inflight = &self.inflight;
            self.t1.admit_guarded(key, bank, |candidate| inflight.has(candidate))
        }
        .map_err(|()| {
            SimError::InvariantViolation(format!(
                "tier-1 bank {bank} has no evictable victim while admitting line {key:?}"
            ))
        })?;

        if let Some(victim) = evicted {
            if self.prefetch_unconsumed.remove(&victim) {
                self.metrics.prefetches_wasted += 1;
            }
        }

        if origin == Origin::Prefetch {
            self.prefetch_unconsumed.insert(key);
        }

        Ok(())
    }

    /// Fast-forwards the clock to retire whatever in-flight fills remain
    /// once the trace is exhausted. No further latency samples are recorded.
    fn drain(&mut self) -> Result<(), SimError> {
        while let Some(max_ready) = self.inflight.max_ready_cycle() {
            self.current_cycle = self.current_cycle.max(max_ready);
            self.retire_ready_fills()?;
            self.check_budget()?;
        }
        Ok(())
    }

    fn check_budget(&self) -> Result<(), SimError> {
        if let Some(budget) = self.config.cycle_budget {
            if self.current_cycle > budget {
                return Err(SimError::BudgetExceeded {
                    budget,
                    metrics: Box::new(self.metrics.clone()),
                });
            }
            if self.current_cycle * 10 >= budget * 9 {
                warn!(
                    current_cycle = self.current_cycle,
                    budget, "approaching cycle budget"
                );
            }
        }
        Ok(())
    }
}
