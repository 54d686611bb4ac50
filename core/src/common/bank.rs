//! Bank routing for the two cache tiers.
//!
//! Each tier spreads its lines across a fixed number of banks so that
//! accesses to different banks can proceed concurrently (mediated by
//! [`crate::bankmap::BankBusyMap`]). Routing is a pure function of the line
//! key and the tier's bank count: `bank = line_key % num_banks`.

use crate::common::addr::LineKey;

/// Routes a line key to its tier-1 bank index.
///
/// `num_t1_banks` must be non-zero; this is enforced by
/// [`crate::config::SimConfig::validate`] before any routing occurs.
#[inline]
#[must_use]
pub fn bank_t1(key: LineKey, num_t1_banks: usize) -> usize {
    bank_of(key, num_t1_banks)
}

/// Routes a line key to its tier-2 bank index.
///
/// Divides out the tier-1 bank count first so that lines mapping to
/// different tier-1 banks still spread across tier-2 banks, matching the
/// reference routing bit-for-bit.
///
/// `num_t1_banks` and `num_t2_banks` must both be non-zero; this is enforced
/// by [`crate::config::SimConfig::validate`] before any routing occurs.
#[inline]
#[must_use]
pub fn bank_t2(key: LineKey, num_t1_banks: usize, num_t2_banks: usize) -> usize {
    debug_assert!(num_t1_banks > 0);
    debug_assert!(num_t2_banks > 0);
    let shifted = key.val() / num_t1_banks as u64;
    (shifted % num_t2_banks as u64) as usize
}

#[inline]
fn bank_of(key: LineKey, num_banks: usize) -> usize {
    debug_assert!(num_banks > 0);
    (key.val() % num_banks as u64) as usize
}
