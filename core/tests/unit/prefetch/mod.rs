//! Integration tests for the stream prefetcher.

/// State-machine behaviour of `StreamPrefetcher`.
pub mod stream_prefetcher;
