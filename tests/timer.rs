use std::time::{Duration, Instant};

use tuipage::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    A,
    B,
    C,
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

// =============================================================================
// Scheduling and polling
// =============================================================================

#[test]
fn test_poll_fires_in_deadline_order() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(30), Action::B);
    timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.schedule(t0, Duration::from_millis(20), Action::C);

    assert_eq!(timers.poll(at(t0, 50)), vec![Action::A, Action::C, Action::B]);
}

#[test]
fn test_poll_before_deadline_fires_nothing() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(10), Action::A);

    assert!(timers.poll(at(t0, 9)).is_empty());
    assert_eq!(timers.len(), 1);
}

#[test]
fn test_poll_removes_fired_timers() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.schedule(t0, Duration::from_millis(100), Action::B);

    assert_eq!(timers.poll(at(t0, 20)), vec![Action::A]);
    assert_eq!(timers.len(), 1);
    assert!(timers.poll(at(t0, 20)).is_empty());
    assert_eq!(timers.poll(at(t0, 100)), vec![Action::B]);
    assert!(timers.is_empty());
}

#[test]
fn test_deadline_is_inclusive() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(10), Action::A);

    assert_eq!(timers.poll(at(t0, 10)), vec![Action::A]);
}

#[test]
fn test_zero_delay_fires_immediately() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::ZERO, Action::A);

    assert_eq!(timers.poll(t0), vec![Action::A]);
}

#[test]
fn test_equal_deadlines_fire_in_schedule_order() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(10), Action::C);
    timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.schedule(t0, Duration::from_millis(10), Action::B);

    assert_eq!(timers.poll(at(t0, 10)), vec![Action::C, Action::A, Action::B]);
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn test_cancel_prevents_firing() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    let handle = timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.schedule(t0, Duration::from_millis(20), Action::B);

    assert!(timers.cancel(handle));
    assert_eq!(timers.poll(at(t0, 50)), vec![Action::B]);
}

#[test]
fn test_cancel_after_fire_reports_false() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    let handle = timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.poll(at(t0, 20));

    assert!(!timers.cancel(handle));
}

#[test]
fn test_cancel_twice_reports_false() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    let handle = timers.schedule(t0, Duration::from_millis(10), Action::A);
    assert!(timers.cancel(handle));
    assert!(!timers.cancel(handle));
}

#[test]
fn test_is_pending_tracks_lifecycle() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    let handle = timers.schedule(t0, Duration::from_millis(10), Action::A);
    assert!(timers.is_pending(handle));

    timers.poll(at(t0, 10));
    assert!(!timers.is_pending(handle));
}

#[test]
fn test_handles_are_never_reused() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    let first = timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.cancel(first);
    let second = timers.schedule(t0, Duration::from_millis(10), Action::B);

    assert_ne!(first, second);
    assert!(!timers.is_pending(first));
    assert!(timers.is_pending(second));
}

// =============================================================================
// Deadlines and bookkeeping
// =============================================================================

#[test]
fn test_next_deadline_is_earliest() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    assert_eq!(timers.next_deadline(), None);

    timers.schedule(t0, Duration::from_millis(30), Action::A);
    let handle = timers.schedule(t0, Duration::from_millis(10), Action::B);
    assert_eq!(timers.next_deadline(), Some(at(t0, 10)));

    timers.cancel(handle);
    assert_eq!(timers.next_deadline(), Some(at(t0, 30)));
}

#[test]
fn test_clear_drops_everything() {
    let mut timers = Timers::new();
    let t0 = Instant::now();

    timers.schedule(t0, Duration::from_millis(10), Action::A);
    timers.schedule(t0, Duration::from_millis(20), Action::B);

    timers.clear();
    assert!(timers.is_empty());
    assert_eq!(timers.next_deadline(), None);
    assert!(timers.poll(at(t0, 100)).is_empty());
}
