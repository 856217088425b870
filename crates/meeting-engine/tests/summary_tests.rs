//! Tests for the meeting summary over a period.

use std::cell::Cell;

use chrono::{DateTime, TimeZone, Utc};
use meeting_engine::config::Preferences;
use meeting_engine::error::{FetchError, PlanError};
use meeting_engine::event::CalendarEvent;
use meeting_engine::source::EventFeed;
use meeting_engine::summary::{summarize_meetings, AttendeeCount};

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn with_attendees(mut event: CalendarEvent, emails: &[&str]) -> CalendarEvent {
    for email in emails {
        event = event.with_attendee(email);
    }
    event
}

#[test]
fn counts_meetings_hours_and_attendees() {
    let events = vec![
        with_attendees(
            CalendarEvent::new("Standup", at(16, 9, 0), at(16, 9, 30)),
            &["ana@example.com", "bo@example.com"],
        ),
        with_attendees(
            CalendarEvent::new("1:1", at(17, 14, 0), at(17, 15, 0)),
            &["ana@example.com"],
        ),
        CalendarEvent::new("Focus", at(18, 13, 0), at(18, 14, 30)),
    ];

    let summary =
        summarize_meetings(&EventFeed::new(events), at(16, 0, 0), at(23, 0, 0), &Preferences::default())
            .unwrap();

    assert_eq!(summary.total_meetings, 3);
    assert_eq!(summary.total_hours, 3.0);
    assert_eq!(summary.period, "2026-03-16 to 2026-03-23");
    assert_eq!(
        summary.summary,
        "3 meetings totaling 3.0 hours from 2026-03-16 to 2026-03-23"
    );
    assert_eq!(
        summary.top_attendees,
        vec![
            AttendeeCount {
                email: "ana@example.com".into(),
                count: 2
            },
            AttendeeCount {
                email: "bo@example.com".into(),
                count: 1
            },
        ]
    );
}

#[test]
fn top_attendees_capped_at_ten_with_ties_by_email() {
    let emails: Vec<String> = (0..12).map(|i| format!("p{:02}@example.com", i)).collect();
    let refs: Vec<&str> = emails.iter().map(String::as_str).collect();
    let events = vec![
        with_attendees(CalendarEvent::new("All hands", at(16, 9, 0), at(16, 10, 0)), &refs),
        with_attendees(
            CalendarEvent::new("Review", at(16, 11, 0), at(16, 12, 0)),
            &["p11@example.com"],
        ),
    ];

    let summary =
        summarize_meetings(&EventFeed::new(events), at(16, 0, 0), at(17, 0, 0), &Preferences::default())
            .unwrap();

    assert_eq!(summary.top_attendees.len(), 10);
    assert_eq!(summary.top_attendees[0].email, "p11@example.com");
    assert_eq!(summary.top_attendees[0].count, 2);
    assert_eq!(summary.top_attendees[1].email, "p00@example.com");
    assert_eq!(summary.top_attendees[9].email, "p08@example.com");
}

#[test]
fn empty_period_summarizes_to_zero() {
    let summary =
        summarize_meetings(&EventFeed::new(vec![]), at(16, 0, 0), at(17, 0, 0), &Preferences::default())
            .unwrap();

    assert_eq!(summary.total_meetings, 0);
    assert_eq!(summary.total_hours, 0.0);
    assert!(summary.top_attendees.is_empty());
    assert_eq!(summary.summary, "0 meetings totaling 0.0 hours from 2026-03-16 to 2026-03-17");
}

#[test]
fn period_uses_configured_timezone() {
    let mut prefs = Preferences::default();
    prefs.meeting_preferences.timezone = chrono_tz::America::Los_Angeles;

    // 02:00 UTC on the 16th is still the evening of the 15th in Los Angeles.
    let summary =
        summarize_meetings(&EventFeed::new(vec![]), at(16, 2, 0), at(18, 2, 0), &prefs).unwrap();

    assert_eq!(summary.period, "2026-03-15 to 2026-03-17");
}

#[test]
fn upstream_error_propagates() {
    let failing = EventFeed::failed(FetchError::new("Calendar API error: 500"));

    let err =
        summarize_meetings(&failing, at(16, 0, 0), at(17, 0, 0), &Preferences::default()).unwrap_err();

    assert_eq!(err, PlanError::Upstream(FetchError::new("Calendar API error: 500")));
}

#[test]
fn inverted_period_is_rejected_before_fetching() {
    let calls = Cell::new(0);
    let source = |_: DateTime<Utc>, _: DateTime<Utc>| -> Result<Vec<CalendarEvent>, FetchError> {
        calls.set(calls.get() + 1);
        Ok(vec![])
    };

    let err = summarize_meetings(&source, at(17, 0, 0), at(16, 0, 0), &Preferences::default())
        .unwrap_err();

    assert!(matches!(err, PlanError::InvalidRequest(_)));
    assert_eq!(calls.get(), 0);
}

#[test]
fn summary_serializes_in_camel_case() {
    let events = vec![with_attendees(
        CalendarEvent::new("Sync", at(16, 9, 0), at(16, 9, 45)),
        &["ana@example.com"],
    )];

    let summary =
        summarize_meetings(&EventFeed::new(events), at(16, 0, 0), at(17, 0, 0), &Preferences::default())
            .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["totalMeetings"], 1);
    assert_eq!(json["totalHours"], 0.75);
    assert_eq!(json["topAttendees"][0]["email"], "ana@example.com");
    assert_eq!(json["topAttendees"][0]["count"], 1);
}
