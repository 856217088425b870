//! Meeting load over a period: how many events, how many hours, and who
//! shows up most often.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::error::{PlanError, Result};
use crate::event::CalendarEvent;
use crate::source::EventSource;

/// Attendees reported in [`MeetingSummary::top_attendees`].
pub const TOP_ATTENDEES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeCount {
    pub email: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    /// `"YYYY-MM-DD to YYYY-MM-DD"` on the configured wall clock.
    pub period: String,
    pub total_meetings: usize,
    pub total_hours: f64,
    pub summary: String,
    /// Most frequent attendees, highest count first; ties break by email.
    pub top_attendees: Vec<AttendeeCount>,
}

/// Fetch the events of `[start, end)` and summarize them.
pub fn summarize_meetings<S>(
    source: &S,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    preferences: &Preferences,
) -> Result<MeetingSummary>
where
    S: EventSource + ?Sized,
{
    if end <= start {
        return Err(PlanError::InvalidRequest(format!(
            "end {} is not after start {}",
            end.to_rfc3339(),
            start.to_rfc3339()
        )));
    }
    let events = source.fetch_events(start, end)?;
    let tz = preferences.meeting_preferences.timezone;
    let first = start.with_timezone(&tz).date_naive();
    let last = end.with_timezone(&tz).date_naive();
    Ok(summarize_events(&events, first, last))
}

fn summarize_events(events: &[CalendarEvent], first: NaiveDate, last: NaiveDate) -> MeetingSummary {
    let total_meetings = events.len();
    let total_minutes: i64 = events.iter().map(|e| e.duration_minutes().max(0)).sum();
    let total_hours = total_minutes as f64 / 60.0;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for attendee in events.iter().flat_map(|e| &e.attendees) {
        if !attendee.email.is_empty() {
            *counts.entry(attendee.email.as_str()).or_default() += 1;
        }
    }
    let mut top_attendees: Vec<AttendeeCount> = counts
        .into_iter()
        .map(|(email, count)| AttendeeCount {
            email: email.to_string(),
            count,
        })
        .collect();
    top_attendees.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.email.cmp(&b.email)));
    top_attendees.truncate(TOP_ATTENDEES);

    let period = format!("{} to {}", first, last);
    tracing::debug!(total_meetings, total_minutes, period = %period, "summarized meetings");

    MeetingSummary {
        summary: format!(
            "{} meetings totaling {:.1} hours from {}",
            total_meetings, total_hours, period
        ),
        period,
        total_meetings,
        total_hours,
        top_attendees,
    }
}
