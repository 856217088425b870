//! Check whether a proposed time range is free.
//!
//! A conflict is any event whose span overlaps the proposed range. Touching
//! events (one ends exactly when the other starts) do not conflict. Flexible
//! blocks are ignored unless the caller asks for them to be respected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, BlockType};
use crate::config::Preferences;
use crate::error::{PlanError, Result};
use crate::event::{CalendarEvent, Interval};
use crate::source::EventSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub conflicts: Vec<CalendarEvent>,
    pub suggestion: Option<String>,
}

pub fn check_availability<S>(
    source: &S,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    respect_flexible: bool,
    preferences: &Preferences,
) -> Result<Availability>
where
    S: EventSource + ?Sized,
{
    let proposed = Interval::new(start, end).ok_or_else(|| {
        PlanError::InvalidRequest(format!(
            "end {} is not after start {}",
            end.to_rfc3339(),
            start.to_rfc3339()
        ))
    })?;
    let events = source.fetch_events(start, end)?;
    Ok(find_conflicts(&proposed, &events, respect_flexible, preferences))
}

fn find_conflicts(
    proposed: &Interval,
    events: &[CalendarEvent],
    respect_flexible: bool,
    preferences: &Preferences,
) -> Availability {
    let conflicts: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| e.interval().is_some_and(|span| span.overlaps(proposed)))
        .filter(|e| respect_flexible || classify(e, preferences) != BlockType::Flexible)
        .cloned()
        .collect();

    let available = conflicts.is_empty();
    Availability {
        available,
        conflicts,
        suggestion: (!available).then(|| "Time slot has conflicts".to_string()),
    }
}
