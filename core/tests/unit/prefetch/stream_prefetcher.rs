use kvcache_sim_core::LineKey;
use kvcache_sim_core::prefetch::{Prefetcher, StreamPrefetcher};

fn key(n: u64) -> LineKey {
    LineKey(n)
}

#[test]
fn a_long_ascending_run_keeps_the_burst_at_lookahead_width() {
    let mut p = StreamPrefetcher::new(2, 8);
    for k in 0..2 {
        p.observe(key(k));
    }
    for k in 2..50 {
        let burst = p.observe(key(k));
        assert_eq!(burst.len(), 8);
        assert_eq!(burst[0], key(k + 1));
    }
}

#[test]
fn trigger_of_one_arms_streaming_on_the_second_ascending_read() {
    let mut p = StreamPrefetcher::new(1, 4);
    // The first observed key always enters `Training` unconditionally, with
    // an empty burst, regardless of `trigger`.
    assert_eq!(p.observe(key(0)), Vec::new());
    assert!(!p.is_streaming());
    let burst = p.observe(key(1));
    assert!(p.is_streaming());
    assert_eq!(burst, vec![key(2), key(3), key(4), key(5)]);
}

#[test]
fn descending_accesses_never_arm_streaming() {
    let mut p = StreamPrefetcher::new(2, 4);
    for k in (0..20).rev() {
        let burst = p.observe(key(k));
        assert!(burst.is_empty());
    }
    assert!(!p.is_streaming());
}

#[test]
fn a_single_repeated_address_never_arms_streaming() {
    let mut p = StreamPrefetcher::new(2, 4);
    for _ in 0..20 {
        p.observe(key(7));
    }
    assert!(!p.is_streaming());
}
