//! Normalized calendar events as delivered by the event-fetch collaborator.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Explicit event type tag attached by the calendar provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    FocusTime,
    OutOfOffice,
    /// Ordinary events, and any tag this crate does not recognise.
    #[default]
    #[serde(other)]
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_response_status")]
    pub response_status: String,
    /// Marks the attendee entry that represents the calendar owner.
    #[serde(default, rename = "self")]
    pub is_self: bool,
}

fn default_response_status() -> String {
    "needsAction".to_string()
}

impl Attendee {
    pub fn declined(&self) -> bool {
        self.response_status == "declined"
    }
}

/// A single normalized calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub event_type: EventType,
}

impl CalendarEvent {
    pub fn new(summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            summary: summary.to_string(),
            start,
            end,
            is_all_day: false,
            attendees: Vec::new(),
            event_type: EventType::Default,
        }
    }

    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_attendee(mut self, email: &str) -> Self {
        self.attendees.push(Attendee {
            email: email.to_string(),
            response_status: default_response_status(),
            is_self: false,
        });
        self
    }

    /// The event's time span, or `None` for zero-length or inverted events.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether the calendar owner has declined this event.
    pub fn declined_by_self(&self) -> bool {
        self.attendees.iter().any(|a| a.is_self && a.declined())
    }
}

/// A half-open time interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// An interval of `minutes` length beginning at `start`.
    ///
    /// `None` if `minutes` is not positive or the end falls outside the
    /// representable time range.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Option<Self> {
        let end = TimeDelta::try_minutes(minutes).and_then(|d| start.checked_add_signed(d))?;
        Self::new(start, end)
    }

    /// An interval of `minutes` length finishing at `end`.
    pub fn ending_at(end: DateTime<Utc>, minutes: i64) -> Option<Self> {
        let start = TimeDelta::try_minutes(minutes).and_then(|d| end.checked_sub_signed(d))?;
        Self::new(start, end)
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Two half-open intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Accepts RFC 3339 timestamps with any offset, and bare `YYYY-MM-DD` dates
/// (all-day events), which are read as midnight UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_timestamps_into_utc() {
        let json = r#"{"summary":"Sync","start":"2026-03-16T10:00:00-04:00","end":"2026-03-16T11:00:00-04:00"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start.to_rfc3339(), "2026-03-16T14:00:00+00:00");
        assert_eq!(event.duration_minutes(), 60);
        assert_eq!(event.event_type, EventType::Default);
    }

    #[test]
    fn parses_all_day_dates() {
        let json = r#"{"summary":"Offsite","start":"2026-03-16","end":"2026-03-17","isAllDay":true}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.duration_minutes(), 24 * 60);
    }

    #[test]
    fn unknown_event_type_is_default() {
        let json = r#"{"start":"2026-03-16T10:00:00Z","end":"2026-03-16T11:00:00Z","eventType":"workingLocation"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::Default);
    }

    #[test]
    fn interval_constructors_reject_unrepresentable_lengths() {
        let t = DateTime::parse_from_rfc3339("2026-03-16T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(Interval::starting_at(t, i64::MAX).is_none());
        assert!(Interval::ending_at(t, i64::MAX).is_none());
        assert!(Interval::starting_at(t, 0).is_none());
        assert_eq!(Interval::ending_at(t, 30).unwrap().duration_minutes(), 30);
    }

    #[test]
    fn zero_length_event_has_no_interval() {
        let t = DateTime::parse_from_rfc3339("2026-03-16T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(CalendarEvent::new("Ping", t, t).interval().is_none());
    }
}
