use super::*;

#[test]
fn manual_clock_clones_share_time() {
    let clock = ManualClock::new();
    let handle = clock.clone();
    assert_eq!(clock.now(), Duration::ZERO);
    handle.advance(Duration::from_millis(16));
    assert_eq!(clock.now(), Duration::from_millis(16));
    handle.advance_ms(4.0);
    assert_eq!(clock.now(), Duration::from_millis(20));
}

#[test]
fn manual_clock_ignores_negative_advance() {
    let clock = ManualClock::new();
    clock.advance_ms(-10.0);
    assert_eq!(clock.now(), Duration::ZERO);
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let clock = MonotonicClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}
