//! Cycle-accurate simulator for a two-tier on-chip memory hierarchy serving
//! LLM KV-cache access patterns, with a hardware stream prefetcher.
//!
//! The crate's contract is a single pure function: a validated
//! [`config::SimConfig`] and an ordered [`common::Trace`] of read/write
//! operations go in, a [`metrics::Metrics`] snapshot comes out. There is no
//! shared mutable state, no I/O, and no concurrency inside a single run — see
//! [`sim`] for the scheduler that ties the pieces together:
//! 1. **Common:** strong address/line-key types, bank routing, and the trace
//!    model (`common`).
//! 2. **Cache:** the banked, set-associative LRU cache shared by both tiers
//!    (`cache`).
//! 3. **Prefetch:** the hardware prefetcher trait and its stream
//!    implementation (`prefetch`).
//! 4. **In-flight and bank-busy bookkeeping:** fills in transit from tier-2
//!    to tier-1, and per-bank contention tracking (`inflight`, `bankmap`).
//! 5. **Simulation:** `Simulator`, configuration, errors, and metrics
//!    (`sim`, `config`, `error`, `metrics`).

/// Strong address/line-key types, bank routing, and the trace model.
pub mod common;
/// Configuration for a single simulation run.
pub mod config;
/// Error types for configuration validation and simulation execution.
pub mod error;
/// The in-flight fill table tracking fetches from tier-2 to tier-1.
pub mod inflight;
/// Per-bank busy-cycle bookkeeping for both hierarchy tiers.
pub mod bankmap;
/// The banked, set-associative cache shared by both hierarchy tiers.
pub mod cache;
/// Metrics aggregation: counters, rates, and latency percentiles.
pub mod metrics;
/// Hardware prefetcher interface and the stream prefetcher implementation.
pub mod prefetch;
/// The trace-driven scheduler tying every component together.
pub mod sim;

/// Root configuration type; construct with `SimConfig::default()` or
/// deserialise from JSON (or any other `serde` format).
pub use crate::config::SimConfig;
/// Configuration and simulation error types.
pub use crate::error::{ConfigError, SimError};
/// The trace model: `ByteAddr`, `LineKey`, `OpKind`, `Operation`, `Trace`.
pub use crate::common::{ByteAddr, LineKey, OpKind, Operation, Trace};
/// A simulation run's accumulated counters and latency series.
pub use crate::metrics::Metrics;
/// Top-level simulator; construct with `Simulator::new` and run with
/// `Simulator::run`.
pub use crate::sim::Simulator;
