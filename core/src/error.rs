//! Error types for configuration validation and simulation execution.

use thiserror::Error;

use crate::metrics::Metrics;

/// Errors raised while validating a [`crate::config::SimConfig`].
///
/// All of these are detected before a single trace operation is simulated;
/// a `SimConfig` that passes [`crate::config::SimConfig::validate`] is
/// guaranteed not to panic or produce nonsensical geometry during a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A capacity field (tier-1 or tier-2 total lines) was zero.
    #[error("{field} must be greater than zero")]
    ZeroCapacity {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A bank count was zero.
    #[error("{field} must be greater than zero")]
    ZeroBanks {
        /// Name of the offending field.
        field: &'static str,
    },

    /// `line_bytes` was not a power of two.
    #[error("line_bytes ({value}) must be a power of two")]
    LineBytesNotPowerOfTwo {
        /// The offending value.
        value: usize,
    },

    /// A tier's total line count was not evenly divisible by its bank count.
    #[error(
        "{tier} total_lines ({total_lines}) is not evenly divisible by num_banks ({num_banks})"
    )]
    LinesNotDivisibleByBanks {
        /// Which tier failed the check (`"tier1"` or `"tier2"`).
        tier: &'static str,
        /// The tier's configured total line count.
        total_lines: usize,
        /// The tier's configured bank count.
        num_banks: usize,
    },

    /// A per-access latency field was zero.
    #[error("{field} must be greater than zero")]
    ZeroLatency {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The stream prefetcher's lookahead distance was zero while the
    /// prefetcher was enabled.
    #[error("prefetch_lookahead must be greater than zero when prefetching is enabled")]
    ZeroLookahead,

    /// `address_bits` was zero or wider than a `u64`.
    #[error("address_bits ({address_bits}) must be in 1..=64")]
    InvalidAddressWidth {
        /// The offending value.
        address_bits: u32,
    },
}

/// Errors raised while running a simulation.
///
/// Because the simulator's contract is a pure function from `(config, trace)`
/// to `Metrics`, every variant here reflects either a malformed input trace
/// or an internal invariant violation; there is no I/O or external state to
/// fail independently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The supplied configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A byte address fell outside the configured `address_bits` range.
    #[error("address {addr:#x} exceeds the configured address_bits range")]
    AddressOverflow {
        /// The offending byte address.
        addr: u64,
    },

    /// A line key that should only ever hit in tier-2 missed instead,
    /// indicating tier-2 capacity was undersized for the workload.
    #[error("tier-2 miss on line key {line_key:#x}: capacity too small for this workload")]
    Tier2Miss {
        /// The line key that missed in tier-2.
        line_key: u64,
    },

    /// The simulation exceeded its configured cycle budget without
    /// draining the trace and all in-flight fills.
    ///
    /// Carries the metrics accumulated up to the point the budget tripped
    /// (boxed to keep this enum's size dominated by its smaller variants),
    /// so a caller can inspect how far the run got before it was cut off.
    #[error("simulation exceeded cycle budget of {budget} without completing")]
    BudgetExceeded {
        /// The configured budget.
        budget: u64,
        /// Metrics accumulated so far, for debugging a runaway trace.
        metrics: Box<Metrics>,
    },

    /// An internal invariant was violated during scheduling.
    ///
    /// This should be unreachable for any config that passed `validate`;
    /// it exists so a broken invariant fails loudly instead of silently
    /// corrupting metrics.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
