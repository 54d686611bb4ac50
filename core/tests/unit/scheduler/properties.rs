use proptest::prelude::*;

use kvcache_sim_core::{ByteAddr, Operation, SimConfig, Simulator, Trace};

/// Builds a config whose tier-2 is always large enough to hold every distinct
/// line a test trace can touch, so `Tier2Miss` never interferes with the
/// invariants under test here.
fn generous_config(t1_total_lines: usize, num_t1_banks: usize) -> SimConfig {
    SimConfig {
        t1_total_lines,
        num_t1_banks,
        t2_total_lines: 1 << 16,
        num_t2_banks: 16,
        ..SimConfig::default()
    }
}

fn arb_trace(max_ops: usize, max_line: u64, line_bytes: u64) -> impl Strategy<Value = Trace> {
    prop::collection::vec(
        (any::<bool>(), 0..max_line).prop_map(move |(is_write, line)| {
            let addr = ByteAddr(line * line_bytes);
            if is_write {
                Operation::write(addr)
            } else {
                Operation::read(addr)
            }
        }),
        0..max_ops,
    )
    .prop_map(Trace::from)
}

proptest! {
    /// Every processed operation is either a tier-1 hit/miss (reads) or a
    /// counted write; the two families never overlap, so their sum always
    /// equals the trace length.
    #[test]
    fn hits_plus_misses_plus_writes_equals_trace_length(
        trace in arb_trace(64, 40, 128)
    ) {
        let len = trace.len() as u64;
        let config = generous_config(256, 8);
        let metrics = Simulator::new(config).unwrap().run(&trace).unwrap();
        prop_assert_eq!(metrics.t1_hits + metrics.t1_misses + metrics.write_count, len);
    }

    /// A prefetch can be consumed at most once: useful plus wasted can never
    /// exceed the number issued.
    #[test]
    fn useful_plus_wasted_prefetches_never_exceeds_issued(
        trace in arb_trace(128, 64, 128)
    ) {
        let config = generous_config(64, 4);
        let metrics = Simulator::new(config).unwrap().run(&trace).unwrap();
        prop_assert!(metrics.prefetches_useful + metrics.prefetches_wasted <= metrics.prefetches_issued);
    }

    /// The simulator is a pure function of its inputs: running the same
    /// config against the same trace twice must produce identical metrics.
    #[test]
    fn running_the_same_trace_twice_is_deterministic(
        trace in arb_trace(64, 32, 128)
    ) {
        let config = generous_config(128, 4);
        let first = Simulator::new(config.clone()).unwrap().run(&trace).unwrap();
        let second = Simulator::new(config).unwrap().run(&trace).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every recorded read latency is at least the tier-1 service latency:
    /// nothing completes faster than a single tier-1 access.
    #[test]
    fn every_read_latency_is_at_least_tier1_latency(
        trace in arb_trace(64, 32, 128)
    ) {
        let config = generous_config(64, 4);
        let t1_latency = config.t1_latency;
        let metrics = Simulator::new(config).unwrap().run(&trace).unwrap();
        for &latency in metrics.read_latencies() {
            prop_assert!(latency >= t1_latency);
        }
    }
}
