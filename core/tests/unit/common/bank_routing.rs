use kvcache_sim_core::LineKey;
use kvcache_sim_core::common::{bank_t1, bank_t2};

#[test]
fn bank_t1_is_in_range_for_every_key() {
    let num_banks = 6;
    for key in 0..200 {
        assert!(bank_t1(LineKey(key), num_banks) < num_banks);
    }
}

#[test]
fn bank_t2_is_in_range_for_every_key() {
    let (num_t1_banks, num_t2_banks) = (4, 5);
    for key in 0..500 {
        assert!(bank_t2(LineKey(key), num_t1_banks, num_t2_banks) < num_t2_banks);
    }
}

#[test]
fn consecutive_lines_spread_across_t1_banks_in_round_robin() {
    let num_banks = 4;
    let banks: Vec<usize> = (0..8).map(|k| bank_t1(LineKey(k), num_banks)).collect();
    assert_eq!(banks, vec![0, 1, 2, 3, 0, 1, 2, 3]);
}

#[test]
fn t2_routing_depends_on_t1_bank_count_first() {
    // With 4 t1 banks, keys 0..4 share the same t1-bank-group and should map
    // to the same t2 bank before the t2 modulo is applied.
    let same_group: Vec<usize> = (0..4).map(|k| bank_t2(LineKey(k), 4, 3)).collect();
    assert!(same_group.iter().all(|&b| b == same_group[0]));
}
