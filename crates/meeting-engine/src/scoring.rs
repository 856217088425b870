//! Preference scoring for candidate meeting slots.
//!
//! Score = 50 base + day-of-week bonus + 30 if the slot sits next to an
//! existing meeting. Scores are only compared with each other; there is no
//! upper bound.

use chrono::{Datelike, Duration, Timelike};

use crate::config::{DayPart, MeetingPreferences};
use crate::event::{CalendarEvent, Interval};

pub const BASE_SCORE: i64 = 50;
pub const ADJACENCY_BONUS: i64 = 30;
/// Fixed score for tier-2 deep-work fallback slots, always below [`BASE_SCORE`].
pub const DEEP_WORK_SCORE: i64 = 25;

/// Slots whose edges come within this distance of a meeting count as adjacent.
const ADJACENCY_TOLERANCE_MINUTES: i64 = 5;

/// Score breakdown for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotScore {
    pub value: i64,
    /// Whether the adjacency bonus was applied.
    pub adjacent: bool,
}

/// Score a free slot against the busy meetings around it.
pub fn score_slot(
    slot: &Interval,
    meetings: &[&CalendarEvent],
    preferences: &MeetingPreferences,
) -> SlotScore {
    let mut value = BASE_SCORE + day_bonus(slot, preferences);

    let adjacent =
        preferences.prefer_adjacent_to_meetings && is_adjacent_to_any(slot, meetings);
    if adjacent {
        value += ADJACENCY_BONUS;
    }

    SlotScore { value, adjacent }
}

/// Day-of-week bonus for the slot's start, read on the configured wall clock.
pub fn day_bonus(slot: &Interval, preferences: &MeetingPreferences) -> i64 {
    let local = slot.start.with_timezone(&preferences.timezone);
    let part = if local.hour() >= preferences.afternoon_start_hour {
        DayPart::Afternoon
    } else {
        DayPart::Morning
    };
    preferences.preferred_days.bonus(local.weekday(), part)
}

/// True if some meeting ends just before the slot starts, or starts just
/// after it ends. Stops at the first match.
fn is_adjacent_to_any(slot: &Interval, meetings: &[&CalendarEvent]) -> bool {
    let tolerance = Duration::minutes(ADJACENCY_TOLERANCE_MINUTES);
    meetings.iter().any(|meeting| {
        (slot.start - meeting.end).abs() < tolerance
            || (meeting.start - slot.end).abs() < tolerance
    })
}
