//! Tick Sequence Tests
//!
//! Validates the normal life of a repeating timer: armed once, ticking
//! every period, counter growing by exactly one per delivered expiry.

use host_api::Duration;
use tests_timers::{pump, test_bootstrap};
use timer_types::{SlotKey, SlotState, StartOutcome};

const PERIOD: Duration = Duration::from_millis(1000);

/// The reference scenario: capacity 1, period 1000 ms.
///
/// This validates that:
/// 1. `start(0)` arms the slot and reports `Started`
/// 2. Three simulated expiries at 1000 ms intervals count to exactly 3
/// 3. The slot is `Armed` again after every expiry
/// 4. A second `start(0)` reports `AlreadyInitialized` and does not touch
///    the counter
#[test]
fn test_reference_tick_sequence() {
    let (mut host, controller, _log) = test_bootstrap(1, PERIOD);
    let key = SlotKey::new(0);

    assert_eq!(
        controller.start(&mut host, key).unwrap(),
        StartOutcome::Started
    );

    pump(&mut host, &controller, 3, PERIOD);

    assert_eq!(controller.call_count(key).unwrap(), 3);
    assert_eq!(controller.slot_state(key).unwrap(), SlotState::Armed);

    assert_eq!(
        controller.start(&mut host, key).unwrap(),
        StartOutcome::AlreadyInitialized
    );
    assert_eq!(controller.call_count(key).unwrap(), 3);
}

#[test]
fn test_count_tracks_delivered_expiries_exactly() {
    let (mut host, controller, _log) = test_bootstrap(1, PERIOD);
    let key = SlotKey::new(0);
    controller.start(&mut host, key).unwrap();

    for expected in 1..=20u64 {
        pump(&mut host, &controller, 1, PERIOD);
        assert_eq!(controller.call_count(key).unwrap(), expected);
    }
}

#[test]
fn test_count_is_monotonic_across_observations() {
    let (mut host, controller, _log) = test_bootstrap(1, PERIOD);
    let key = SlotKey::new(0);
    controller.start(&mut host, key).unwrap();

    let mut last = controller.call_count(key).unwrap();
    for _ in 0..10 {
        pump(&mut host, &controller, 1, PERIOD);
        let current = controller.call_count(key).unwrap();
        assert!(current >= last);
        last = current;
    }
}

#[test]
fn test_no_expiry_before_the_period_elapses() {
    let (mut host, controller, _log) = test_bootstrap(1, PERIOD);
    let key = SlotKey::new(0);
    controller.start(&mut host, key).unwrap();

    // Half a period: nothing is due yet.
    pump(&mut host, &controller, 1, Duration::from_millis(500));
    assert_eq!(controller.call_count(key).unwrap(), 0);

    // The second half completes the period.
    pump(&mut host, &controller, 1, Duration::from_millis(500));
    assert_eq!(controller.call_count(key).unwrap(), 1);
}

#[test]
fn test_out_of_range_start_leaves_store_untouched() {
    let (mut host, controller, log) = test_bootstrap(2, PERIOD);

    for bad in [2u32, 3, 100] {
        assert!(controller.start(&mut host, SlotKey::new(bad)).is_err());
    }

    for good in [0u32, 1] {
        assert_eq!(
            controller.slot_state(SlotKey::new(good)).unwrap(),
            SlotState::Uninitialized
        );
    }
    assert_eq!(host.handle_count(), 0);
    assert_eq!(log.count_message("timer.started"), 0);
}

#[test]
fn test_slots_tick_independently() {
    let (mut host, controller, _log) = test_bootstrap(3, PERIOD);
    controller.start(&mut host, SlotKey::new(0)).unwrap();

    pump(&mut host, &controller, 2, PERIOD);
    controller.start(&mut host, SlotKey::new(1)).unwrap();
    pump(&mut host, &controller, 3, PERIOD);

    assert_eq!(controller.call_count(SlotKey::new(0)).unwrap(), 5);
    assert_eq!(controller.call_count(SlotKey::new(1)).unwrap(), 3);
    assert_eq!(controller.call_count(SlotKey::new(2)).unwrap(), 0);
}
