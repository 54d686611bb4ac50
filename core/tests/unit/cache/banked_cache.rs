use kvcache_sim_core::LineKey;
use kvcache_sim_core::cache::{BankedCache, Probe};

#[test]
fn hits_and_misses_are_tallied_per_bank_on_demand() {
    let mut cache = BankedCache::new(2, 4);
    cache.admit(LineKey(1), 0);

    if cache.probe(LineKey(1), 0).is_hit() {
        cache.record_hit(0);
    } else {
        cache.record_miss(0);
    }
    if cache.probe(LineKey(99), 1).is_hit() {
        cache.record_hit(1);
    } else {
        cache.record_miss(1);
    }

    assert_eq!(cache.bank_hits(0), 1);
    assert_eq!(cache.bank_misses(1), 1);
}

#[test]
fn admit_guarded_protects_in_flight_keys_across_repeated_pressure() {
    let mut cache = BankedCache::new(1, 2);
    cache.admit(LineKey(1), 0);
    cache.admit(LineKey(2), 0);

    // Key 1 is protected (e.g. in flight); every subsequent admission must
    // evict something other than 1.
    for new_key in 3..10 {
        let victim = cache
            .admit_guarded(LineKey(new_key), 0, |k| k == LineKey(1))
            .unwrap();
        assert_ne!(victim, Some(LineKey(1)));
        assert!(cache.probe(LineKey(1), 0).is_hit());
    }
}

#[test]
fn each_bank_has_its_own_independent_capacity() {
    let mut cache = BankedCache::new(2, 1);
    assert_eq!(cache.admit(LineKey(1), 0), None);
    assert_eq!(cache.admit(LineKey(2), 1), None);
    assert_eq!(cache.len(0), 1);
    assert_eq!(cache.len(1), 1);
    assert_eq!(cache.probe(LineKey(2), 0), Probe::Miss);
}
