use kvcache_sim_core::LineKey;
use kvcache_sim_core::cache::LruSet;

#[test]
fn a_full_sweep_of_distinct_keys_evicts_oldest_first() {
    let mut set = LruSet::new(4);
    for key in 0..4 {
        assert_eq!(set.insert(LineKey(key)), None);
    }
    for key in 4..8 {
        assert_eq!(set.insert(LineKey(key)), Some(LineKey(key - 4)));
    }
}

#[test]
fn repeated_touch_of_the_same_key_never_evicts_it() {
    let mut set = LruSet::new(2);
    set.insert(LineKey(1));
    set.insert(LineKey(2));
    for _ in 0..50 {
        set.touch(LineKey(1));
    }
    assert_eq!(set.insert(LineKey(3)), Some(LineKey(2)));
    assert!(set.contains(LineKey(1)));
}

#[test]
fn lru_iter_length_matches_set_length() {
    let mut set = LruSet::new(5);
    for key in 0..3 {
        set.insert(LineKey(key));
    }
    assert_eq!(set.lru_iter().count(), set.len());
}

#[test]
fn removing_every_key_empties_the_set() {
    let mut set = LruSet::new(3);
    for key in 0..3 {
        set.insert(LineKey(key));
    }
    for key in 0..3 {
        assert!(set.remove(LineKey(key)));
    }
    assert!(set.is_empty());
    assert_eq!(set.lru_iter().count(), 0);
}
