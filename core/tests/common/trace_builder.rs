//! Helpers for building traces and one-off configuration overrides without
//! repeating `SimConfig { ..., ..SimConfig::default() }` boilerplate at every
//! call site.

use kvcache_sim_core::{ByteAddr, Operation, SimConfig, Trace};

/// Builds a default `SimConfig` and applies `overrides` to it.
pub fn config_with(overrides: impl FnOnce(&mut SimConfig)) -> SimConfig {
    let mut config = SimConfig::default();
    overrides(&mut config);
    config
}

/// Builds a trace of `count` reads at consecutive line-aligned addresses,
/// starting at line 0.
pub fn sequential_reads(count: u64, line_bytes: u64) -> Trace {
    (0..count).map(|i| Operation::read(ByteAddr(i * line_bytes))).collect()
}

/// Builds a trace of reads at the given byte addresses, in order.
pub fn reads(addrs: impl IntoIterator<Item = u64>) -> Trace {
    addrs.into_iter().map(|a| Operation::read(ByteAddr(a))).collect()
}

/// Builds a trace of writes at the given byte addresses, in order.
pub fn writes(addrs: impl IntoIterator<Item = u64>) -> Trace {
    addrs.into_iter().map(|a| Operation::write(ByteAddr(a))).collect()
}
