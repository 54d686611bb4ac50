//! Boundary-case traces from the spec's testable-properties table, fed as
//! `rstest` fixtures instead of one near-identical `#[test]` fn each.

use rstest::rstest;

use kvcache_sim_core::{ByteAddr, Operation, SimConfig, Simulator, Trace};

#[rstest]
#[case::empty_trace(Trace::new(), 0, 0, 0)]
#[case::single_read(vec![Operation::read(ByteAddr(0))].into(), 0, 1, 1)]
#[case::all_writes(
    (0..8).map(|i| Operation::write(ByteAddr(i * 128))).collect(),
    8,
    0,
    0
)]
#[case::repeated_line(
    (0..10).map(|_| Operation::read(ByteAddr(0))).collect(),
    0,
    1,
    9
)]
fn boundary_trace_produces_the_expected_counters(
    #[case] trace: Trace,
    #[case] expected_writes: u64,
    #[case] expected_t1_misses: u64,
    #[case] expected_t1_hits: u64,
) {
    let metrics = Simulator::new(SimConfig::default()).unwrap().run(&trace).unwrap();
    assert_eq!(metrics.write_count, expected_writes);
    assert_eq!(metrics.t1_misses, expected_t1_misses);
    assert_eq!(metrics.t1_hits, expected_t1_hits);
}
