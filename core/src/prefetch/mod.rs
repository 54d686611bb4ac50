//! Hardware prefetcher interface and the stream prefetcher implementation.

pub mod stream;

pub use stream::StreamPrefetcher;

use crate::common::addr::LineKey;

/// Trait for hardware prefetcher implementations.
///
/// A prefetcher observes demand reads and proposes candidate line keys to
/// fetch ahead of need. It knows nothing about cache occupancy, bank
/// arbitration, or in-flight fills — that filtering is the scheduler's
/// responsibility (`crate::sim`), which mirrors how a cache's own access
/// path filters a prefetcher's raw candidate list through residency checks
/// before installing.
pub trait Prefetcher {
    /// Observes a demand read of `key` and returns candidate keys to
    /// prefetch, in the order they should be attempted.
    ///
    /// Writes never call `observe`: only reads train and trigger the stream
    /// prefetcher. The returned list is unfiltered — it may include keys
    /// already resident or already in flight, which the caller is expected
    /// to skip.
    fn observe(&mut self, key: LineKey) -> Vec<LineKey>;
}
