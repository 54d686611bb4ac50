use kvcache_sim_core::common::line_of;
use kvcache_sim_core::{ByteAddr, LineKey};

#[test]
fn line_of_is_stable_across_every_address_within_a_line() {
    let line_bytes = 256;
    let line = line_of(ByteAddr(256), line_bytes, 64).unwrap();
    for offset in 0..256 {
        assert_eq!(line_of(ByteAddr(256 + offset), line_bytes, 64).unwrap(), line);
    }
}

#[test]
fn adjacent_lines_are_never_equal() {
    let line_bytes = 128;
    let a = line_of(ByteAddr(0), line_bytes, 64).unwrap();
    let b = line_of(ByteAddr(128), line_bytes, 64).unwrap();
    assert_ne!(a, b);
}

#[test]
fn address_beyond_the_configured_width_is_rejected() {
    let line_bytes = 128;
    assert!(line_of(ByteAddr(4096), line_bytes, 12).is_err());
    assert!(line_of(ByteAddr(4095), line_bytes, 12).is_ok());
}

#[test]
fn offset_and_follows_are_consistent() {
    let base = LineKey(40);
    for i in 1..=8 {
        assert!(base.offset(i).follows(base.offset(i - 1)));
    }
}

#[test]
fn follows_is_not_symmetric() {
    let a = LineKey(10);
    let b = LineKey(11);
    assert!(b.follows(a));
    assert!(!a.follows(b));
}
