//! Configuration for the memory hierarchy simulator.
//!
//! `SimConfig` is a closed, validated configuration record: every field has
//! a documented default, deserialises from JSON (or any other `serde` format
//! a caller chooses) via named default functions, and is checked for
//! internal consistency by [`SimConfig::validate`] before a simulator is
//! constructed from it. There is no dynamic/attribute-style configuration
//! bag and no hidden parameters.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default tier-1 aggregate capacity, in lines.
    pub const T1_TOTAL_LINES: usize = 2048;

    /// Default number of tier-1 banks.
    pub const NUM_T1_BANKS: usize = 8;

    /// Default tier-2 aggregate capacity, in lines.
    pub const T2_TOTAL_LINES: usize = 65536;

    /// Default number of tier-2 banks.
    pub const NUM_T2_BANKS: usize = 16;

    /// Default cache line size in bytes.
    pub const LINE_BYTES: usize = 128;

    /// Default tier-1 service latency, in cycles.
    pub const T1_LATENCY: u64 = 1;

    /// Default tier-2 service latency, in cycles.
    pub const T2_LATENCY: u64 = 3;

    /// Default consecutive-sequential-read count that arms streaming.
    pub const PREFETCH_TRIGGER: u32 = 2;

    /// Default maximum in-flight prefetch distance ahead of the last read.
    pub const PREFETCH_LOOKAHEAD: u64 = 16;

    /// Default maximum prefetches issued per observed read.
    pub const PREFETCH_ISSUE_WIDTH: usize = 4;

    /// Default optional cycle budget: unset (no cap) by default.
    pub const CYCLE_BUDGET: Option<u64> = None;

    /// Default address width, in bits: the full range of a `u64` byte
    /// address, i.e. no narrower bound than the key type itself.
    pub const ADDRESS_BITS: u32 = 64;
}

/// Configuration for a single simulation run.
///
/// # Examples
///
/// ```
/// use kvcache_sim_core::config::SimConfig;
///
/// let json = r#"{
///     "t1_total_lines": 1024,
///     "num_t1_banks": 4,
///     "t2_total_lines": 32768,
///     "num_t2_banks": 8
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.t1_total_lines, 1024);
/// assert_eq!(config.line_bytes, 128); // default
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Tier-1 aggregate capacity, in lines.
    #[serde(default = "SimConfig::default_t1_total_lines")]
    pub t1_total_lines: usize,

    /// Number of tier-1 banks; must evenly divide `t1_total_lines`.
    #[serde(default = "SimConfig::default_num_t1_banks")]
    pub num_t1_banks: usize,

    /// Tier-2 aggregate capacity, in lines.
    #[serde(default = "SimConfig::default_t2_total_lines")]
    pub t2_total_lines: usize,

    /// Number of tier-2 banks; must evenly divide `t2_total_lines`.
    #[serde(default = "SimConfig::default_num_t2_banks")]
    pub num_t2_banks: usize,

    /// Cache line size in bytes; must be a power of two.
    #[serde(default = "SimConfig::default_line_bytes")]
    pub line_bytes: usize,

    /// Tier-1 service latency, in cycles.
    #[serde(default = "SimConfig::default_t1_latency")]
    pub t1_latency: u64,

    /// Tier-2 service latency, in cycles.
    #[serde(default = "SimConfig::default_t2_latency")]
    pub t2_latency: u64,

    /// Consecutive-sequential-read count that arms the stream prefetcher.
    #[serde(default = "SimConfig::default_prefetch_trigger")]
    pub prefetch_trigger: u32,

    /// Maximum distance, in lines, the stream prefetcher runs ahead of the
    /// last observed read.
    #[serde(default = "SimConfig::default_prefetch_lookahead")]
    pub prefetch_lookahead: u64,

    /// Maximum number of prefetches the scheduler may issue in response to
    /// a single observed read. Zero disables prefetching entirely.
    #[serde(default = "SimConfig::default_prefetch_issue_width")]
    pub prefetch_issue_width: usize,

    /// Optional soft cap on `current_cycle`, guarding against pathological
    /// inputs. `None` means no cap.
    #[serde(default)]
    pub cycle_budget: Option<u64>,

    /// Width, in bits, of the representable address range. A trace
    /// operation whose byte address does not fit in this many bits fails
    /// the run with [`crate::error::SimError::AddressOverflow`]. Defaults
    /// to 64 (the full range of a `u64` byte address, i.e. no narrower
    /// bound than the key type itself).
    #[serde(default = "SimConfig::default_address_bits")]
    pub address_bits: u32,
}

impl SimConfig {
    fn default_t1_total_lines() -> usize {
        defaults::T1_TOTAL_LINES
    }

    fn default_num_t1_banks() -> usize {
        defaults::NUM_T1_BANKS
    }

    fn default_t2_total_lines() -> usize {
        defaults::T2_TOTAL_LINES
    }

    fn default_num_t2_banks() -> usize {
        defaults::NUM_T2_BANKS
    }

    fn default_line_bytes() -> usize {
        defaults::LINE_BYTES
    }

    fn default_t1_latency() -> u64 {
        defaults::T1_LATENCY
    }

    fn default_t2_latency() -> u64 {
        defaults::T2_LATENCY
    }

    fn default_prefetch_trigger() -> u32 {
        defaults::PREFETCH_TRIGGER
    }

    fn default_prefetch_lookahead() -> u64 {
        defaults::PREFETCH_LOOKAHEAD
    }

    fn default_prefetch_issue_width() -> usize {
        defaults::PREFETCH_ISSUE_WIDTH
    }

    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    /// Tier-1 per-bank capacity: `t1_total_lines / num_t1_banks`.
    ///
    /// Only meaningful after [`Self::validate`] has confirmed the division
    /// is exact.
    #[inline]
    #[must_use]
    pub fn t1_capacity_per_bank(&self) -> usize {
        self.t1_total_lines / self.num_t1_banks.max(1)
    }

    /// Tier-2 per-bank capacity: `t2_total_lines / num_t2_banks`.
    #[inline]
    #[must_use]
    pub fn t2_capacity_per_bank(&self) -> usize {
        self.t2_total_lines / self.num_t2_banks.max(1)
    }

    /// Validates this configuration, returning the first violated
    /// constraint found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any capacity, bank count, or latency is
    /// zero; if `line_bytes` is not a power of two; if either tier's total
    /// line count does not divide evenly by its bank count; if prefetching
    /// is enabled (`prefetch_issue_width > 0`) with a zero lookahead; or if
    /// `address_bits` is zero or wider than a `u64`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.t1_total_lines == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "t1_total_lines",
            });
        }
        if self.t2_total_lines == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "t2_total_lines",
            });
        }
        if self.num_t1_banks == 0 {
            return Err(ConfigError::ZeroBanks {
                field: "num_t1_banks",
            });
        }
        if self.num_t2_banks == 0 {
            return Err(ConfigError::ZeroBanks {
                field: "num_t2_banks",
            });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::LineBytesNotPowerOfTwo {
                value: self.line_bytes,
            });
        }
        if self.t1_total_lines % self.num_t1_banks != 0 {
            return Err(ConfigError::LinesNotDivisibleByBanks {
                tier: "tier1",
                total_lines: self.t1_total_lines,
                num_banks: self.num_t1_banks,
            });
        }
        if self.t2_total_lines % self.num_t2_banks != 0 {
            return Err(ConfigError::LinesNotDivisibleByBanks {
                tier: "tier2",
                total_lines: self.t2_total_lines,
                num_banks: self.num_t2_banks,
            });
        }
        if self.t1_latency == 0 {
            return Err(ConfigError::ZeroLatency {
                field: "t1_latency",
            });
        }
        if self.t2_latency == 0 {
            return Err(ConfigError::ZeroLatency {
                field: "t2_latency",
            });
        }
        if self.prefetch_issue_width > 0 && self.prefetch_lookahead == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        if self.address_bits == 0 || self.address_bits > u64::BITS {
            return Err(ConfigError::InvalidAddressWidth {
                address_bits: self.address_bits,
            });
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            t1_total_lines: defaults::T1_TOTAL_LINES,
            num_t1_banks: defaults::NUM_T1_BANKS,
            t2_total_lines: defaults::T2_TOTAL_LINES,
            num_t2_banks: defaults::NUM_T2_BANKS,
            line_bytes: defaults::LINE_BYTES,
            t1_latency: defaults::T1_LATENCY,
            t2_latency: defaults::T2_LATENCY,
            prefetch_trigger: defaults::PREFETCH_TRIGGER,
            prefetch_lookahead: defaults::PREFETCH_LOOKAHEAD,
            prefetch_issue_width: defaults::PREFETCH_ISSUE_WIDTH,
            cycle_budget: defaults::CYCLE_BUDGET,
            address_bits: defaults::ADDRESS_BITS,
        }
    }
}
