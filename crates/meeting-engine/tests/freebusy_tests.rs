//! Tests for free-slot search between busy intervals.

use chrono::{DateTime, TimeZone, Utc};
use meeting_engine::event::Interval;
use meeting_engine::freebusy::find_free_slots;

/// 2026-03-16 (a Monday) at the given time.
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

/// Helper to create a busy interval from hour ranges on 2026-03-16.
fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(at(start_hour, start_min), at(end_hour, end_min)).unwrap()
}

#[test]
fn single_meeting_yields_slot_before_and_at_its_end() {
    // Window: 09:00-18:00, meeting 10:00-11:00, 30 min requested.
    let slots: Vec<Interval> =
        find_free_slots(&[busy(10, 0, 11, 0)], at(9, 0), at(18, 0), 30).collect();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0], busy(9, 0, 9, 30));
    assert_eq!(slots[1].start, at(11, 0));
    assert_eq!(slots[1].end, at(11, 30));
}

#[test]
fn no_busy_intervals_gives_one_slot_at_window_start() {
    let slots: Vec<Interval> = find_free_slots(&[], at(9, 0), at(18, 0), 45).collect();

    assert_eq!(slots, vec![busy(9, 0, 9, 45)]);
}

#[test]
fn window_shorter_than_duration_gives_nothing() {
    let slots: Vec<Interval> = find_free_slots(&[], at(9, 0), at(9, 20), 30).collect();

    assert!(slots.is_empty());
}

#[test]
fn unrepresentable_duration_gives_nothing() {
    let meetings = [busy(10, 0, 11, 0)];

    assert_eq!(find_free_slots(&meetings, at(9, 0), at(18, 0), i64::MAX).count(), 0);
    assert_eq!(find_free_slots(&[], at(9, 0), at(18, 0), i64::MIN).count(), 0);
}

#[test]
fn gap_exactly_the_duration_is_used() {
    // 09:00-09:30 is free, then busy until 17:30, then 17:30-18:00 free.
    let slots: Vec<Interval> =
        find_free_slots(&[busy(9, 30, 17, 30)], at(9, 0), at(18, 0), 30).collect();

    assert_eq!(slots, vec![busy(9, 0, 9, 30), busy(17, 30, 18, 0)]);
}

#[test]
fn unsorted_input_is_sorted_first() {
    let events = vec![busy(15, 0, 16, 0), busy(9, 0, 10, 0), busy(12, 0, 13, 0)];

    let slots: Vec<Interval> = find_free_slots(&events, at(9, 0), at(17, 0), 60).collect();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(10, 0), at(13, 0), at(16, 0)]);
}

#[test]
fn overlapping_and_nested_intervals_never_move_cursor_back() {
    // 10:00-13:00 swallows 11:00-11:30; cursor must stay at 13:00.
    let events = vec![busy(10, 0, 13, 0), busy(11, 0, 11, 30), busy(12, 0, 12, 30)];

    let slots: Vec<Interval> = find_free_slots(&events, at(10, 0), at(15, 0), 30).collect();

    assert_eq!(slots, vec![busy(13, 0, 13, 30)]);
}

#[test]
fn busy_interval_starting_before_window_pushes_cursor() {
    let slots: Vec<Interval> =
        find_free_slots(&[busy(7, 0, 9, 30)], at(9, 0), at(11, 0), 30).collect();

    assert_eq!(slots, vec![busy(9, 30, 10, 0)]);
}

#[test]
fn busy_interval_after_window_does_not_leak_slots_outside() {
    // The gap before 20:00 is measured only up to the window end.
    let slots: Vec<Interval> =
        find_free_slots(&[busy(20, 0, 21, 0)], at(17, 0), at(17, 45), 30).collect();

    assert_eq!(slots, vec![busy(17, 0, 17, 30)]);
    assert!(slots.iter().all(|s| s.end <= at(17, 45)));
}

#[test]
fn events_filling_entire_window_no_free_slots() {
    let slots: Vec<Interval> =
        find_free_slots(&[busy(9, 0, 12, 0)], at(9, 0), at(12, 0), 15).collect();

    assert!(slots.is_empty());
}

#[test]
fn non_positive_duration_yields_nothing() {
    assert_eq!(find_free_slots(&[], at(9, 0), at(17, 0), 0).count(), 0);
    assert_eq!(find_free_slots(&[], at(9, 0), at(17, 0), -30).count(), 0);
}

#[test]
fn sequence_is_lazy_and_restartable() {
    let events = vec![busy(10, 0, 11, 0), busy(12, 0, 13, 0)];
    let slots = find_free_slots(&events, at(9, 0), at(17, 0), 30);

    let first_pass: Vec<Interval> = slots.clone().collect();
    let second_pass: Vec<Interval> = slots.collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass.len(), 3);

    let mut lazy = find_free_slots(&events, at(9, 0), at(17, 0), 30);
    assert_eq!(lazy.next(), Some(busy(9, 0, 9, 30)));
    let resumed = lazy.clone();
    assert_eq!(lazy.collect::<Vec<_>>(), resumed.collect::<Vec<_>>());
}

#[test]
fn back_to_back_meetings_leave_no_inner_gap() {
    let events = vec![busy(9, 0, 10, 0), busy(10, 0, 11, 0)];

    let slots: Vec<Interval> = find_free_slots(&events, at(9, 0), at(12, 0), 30).collect();

    assert_eq!(slots, vec![busy(11, 0, 11, 30)]);
}
