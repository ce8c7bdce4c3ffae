use super::*;

#[test]
fn zero_interval_is_rejected() {
    assert!(Autoplay::new(0).is_err());
}

#[test]
fn fires_once_per_period_at_each_due_time() {
    let mut a = Autoplay::new(1000).unwrap();
    a.start(Millis(0));
    assert_eq!(a.poll(Millis(999)), None);

    let mut fired = Vec::new();
    while let Some(due) = a.poll(Millis(3500)) {
        fired.push(due);
    }
    assert_eq!(fired, vec![Millis(1000), Millis(2000), Millis(3000)]);
    assert_eq!(a.next_due(), Some(Millis(4000)));
}

#[test]
fn hidden_stops_and_visible_restarts_fresh() {
    let mut a = Autoplay::new(1000).unwrap();
    a.start(Millis(0));
    a.set_visible(false, Millis(500));
    assert!(!a.is_running());
    assert_eq!(a.poll(Millis(10_000)), None);

    a.set_visible(true, Millis(10_000));
    assert_eq!(a.next_due(), Some(Millis(11_000)));
    assert_eq!(a.poll(Millis(10_999)), None);
    assert_eq!(a.poll(Millis(11_000)), Some(Millis(11_000)));
}

#[test]
fn stopped_timer_never_fires() {
    let mut a = Autoplay::new(DEFAULT_AUTOPLAY_INTERVAL_MS).unwrap();
    assert_eq!(a.poll(Millis(u64::MAX)), None);
    a.start(Millis(0));
    a.stop();
    assert_eq!(a.poll(Millis(u64::MAX)), None);
}

#[test]
fn end_of_clock_fires_once_then_stops() {
    let mut a = Autoplay::new(DEFAULT_AUTOPLAY_INTERVAL_MS).unwrap();
    a.start(Millis(u64::MAX - 5));
    assert_eq!(a.next_due(), Some(Millis(u64::MAX)));
    assert_eq!(a.poll(Millis(u64::MAX)), Some(Millis(u64::MAX)));
    assert_eq!(a.poll(Millis(u64::MAX)), None);
    assert!(!a.is_running());
}

#[test]
fn pending_counts_and_skip_drops_due_times() {
    let mut a = Autoplay::new(1000).unwrap();
    assert_eq!(a.pending(Millis(5000)), 0);
    a.start(Millis(0));
    assert_eq!(a.pending(Millis(999)), 0);
    assert_eq!(a.pending(Millis(1000)), 1);
    assert_eq!(a.pending(Millis(5500)), 5);

    a.skip(4);
    assert_eq!(a.next_due(), Some(Millis(5000)));
    assert_eq!(a.poll(Millis(5500)), Some(Millis(5000)));
    assert_eq!(a.poll(Millis(5500)), None);

    a.skip(u64::MAX);
    assert!(!a.is_running());
}
