//! Find free meeting-sized slots between busy intervals.
//!
//! Busy intervals are stably sorted by start time, then a cursor walks forward
//! through them. Whenever the gap ahead of the cursor can hold the requested
//! duration, a slot anchored at the cursor is emitted. The cursor only ever
//! advances (`max(cursor, busy.end)`), so overlapping or nested busy intervals
//! cannot move it backwards.

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::Interval;

/// Lazy sequence of free slots produced by [`find_free_slots`].
///
/// Each item is exactly `duration` long and lies inside the search window.
/// The iterator owns its inputs, so cloning it restarts the walk from the
/// clone's position with no shared state.
#[derive(Debug, Clone)]
pub struct FreeSlots {
    busy: Vec<Interval>,
    next_busy: usize,
    cursor: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: TimeDelta,
    finished: bool,
}

impl FreeSlots {
    fn slot_before(&self, limit: DateTime<Utc>) -> Option<Interval> {
        let limit = limit.min(self.window_end);
        (limit - self.cursor >= self.duration).then(|| Interval {
            start: self.cursor,
            end: self.cursor + self.duration,
        })
    }
}

impl Iterator for FreeSlots {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        while let Some(busy) = self.busy.get(self.next_busy).copied() {
            self.next_busy += 1;
            let slot = self.slot_before(busy.start);
            self.cursor = self.cursor.max(busy.end);
            if slot.is_some() {
                return slot;
            }
        }
        if self.finished {
            return None;
        }
        self.finished = true;
        self.slot_before(self.window_end)
    }
}

/// Find one free slot of `duration_minutes` per gap between `busy` intervals
/// inside `[window_start, window_end)`.
///
/// With no busy intervals the result is the single slot
/// `[window_start, window_start + duration)`, provided the window fits it.
/// A non-positive duration, or one too long to represent, yields nothing.
pub fn find_free_slots(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration_minutes: i64,
) -> FreeSlots {
    let duration = TimeDelta::try_minutes(duration_minutes).filter(|d| *d > TimeDelta::zero());
    let finished = duration.is_none();
    let mut sorted = if finished { Vec::new() } else { busy.to_vec() };
    // `sort_by_key` is stable: ties keep their input order.
    sorted.sort_by_key(|interval| interval.start);

    FreeSlots {
        busy: sorted,
        next_busy: 0,
        cursor: window_start,
        window_end,
        duration: duration.unwrap_or(TimeDelta::zero()),
        finished,
    }
}
