//! Byte address and line key types.
//!
//! This module defines strong types for byte addresses and line-aligned keys
//! so the cache, prefetcher, and in-flight bookkeeping can never accidentally
//! mix a raw byte address with the normalised key they all actually operate
//! on.

use crate::error::SimError;

/// A raw byte address from a trace operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteAddr(pub u64);

/// A line-aligned address: `byte_address / line_bytes`.
///
/// All caches, prefetcher state, and in-flight bookkeeping use line keys
/// only; a `LineKey` is never compared against a `ByteAddr` without going
/// through [`line_of`] first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineKey(pub u64);

impl ByteAddr {
    /// Creates a new byte address from a raw 64-bit value.
    #[inline]
    #[must_use]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the underlying raw value.
    #[inline]
    #[must_use]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl LineKey {
    /// Returns the underlying raw value.
    #[inline]
    #[must_use]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the line key `i` lines ahead of this one.
    ///
    /// Used by the stream prefetcher to generate lookahead candidates
    /// (`last + i` for `i = 1..=lookahead`).
    #[inline]
    #[must_use]
    pub const fn offset(self, i: u64) -> Self {
        Self(self.0.wrapping_add(i))
    }

    /// Returns `true` if `self` is exactly one line ahead of `other`.
    #[inline]
    #[must_use]
    pub fn follows(self, other: Self) -> bool {
        other.0.checked_add(1) == Some(self.0)
    }
}

/// Normalises a byte address to its line-aligned key: `addr / line_bytes`.
///
/// `line_bytes` is guaranteed a power of two by [`crate::config::SimConfig::validate`],
/// so this is equivalent to `addr >> log2(line_bytes)`, but expressed as the
/// division the spec's component design names directly.
///
/// `address_bits` bounds the representable address range (see
/// [`crate::config::SimConfig::address_bits`]); an address that does not fit
/// in that many bits is rejected before the division. `address_bits == 64`
/// (the default) admits every `u64` value.
///
/// # Errors
///
/// Returns [`SimError::AddressOverflow`] if `addr` does not fit in
/// `address_bits` bits.
pub fn line_of(addr: ByteAddr, line_bytes: usize, address_bits: u32) -> Result<LineKey, SimError> {
    let line_bytes = line_bytes as u64;
    debug_assert!(line_bytes.is_power_of_two());
    debug_assert!((1..=u64::BITS).contains(&address_bits));
    if address_bits < u64::BITS && addr.val() >= (1u64 << address_bits) {
        return Err(SimError::AddressOverflow { addr: addr.val() });
    }
    Ok(LineKey(addr.val() / line_bytes))
}
