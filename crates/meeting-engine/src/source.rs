//! The boundary to the event-fetch collaborator.
//!
//! The engine never talks to a calendar provider itself. Callers hand it an
//! [`EventSource`] that either yields normalized events for a window or fails
//! with a [`FetchError`], which the engine passes back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::event::CalendarEvent;

pub trait EventSource {
    /// Events overlapping `[window_start, window_end)`.
    fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, FetchError>;
}

/// A fetch result in its JSON form: `{"events": [...]}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedDocument {
    Failed(FetchError),
    Events { events: Vec<CalendarEvent> },
}

/// An in-memory event feed, typically parsed from a [`FeedDocument`].
#[derive(Debug, Clone)]
pub struct EventFeed {
    result: Result<Vec<CalendarEvent>, FetchError>,
    include_declined: bool,
}

impl EventFeed {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            result: Ok(events),
            include_declined: false,
        }
    }

    /// A feed whose every fetch fails with `error`.
    pub fn failed(error: FetchError) -> Self {
        Self {
            result: Err(error),
            include_declined: false,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let document: FeedDocument = serde_json::from_str(json)?;
        Ok(document.into())
    }

    /// Keep events the calendar owner has declined. They are dropped by default.
    pub fn include_declined(mut self, include: bool) -> Self {
        self.include_declined = include;
        self
    }
}

impl From<FeedDocument> for EventFeed {
    fn from(document: FeedDocument) -> Self {
        match document {
            FeedDocument::Failed(error) => EventFeed::failed(error),
            FeedDocument::Events { events } => EventFeed::new(events),
        }
    }
}

impl EventSource for EventFeed {
    fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, FetchError> {
        let events = self.result.as_ref().map_err(Clone::clone)?;
        Ok(events
            .iter()
            .filter(|e| e.start < window_end && e.end > window_start)
            .filter(|e| self.include_declined || !e.declined_by_self())
            .cloned()
            .collect())
    }
}

impl<F> EventSource for F
where
    F: Fn(DateTime<Utc>, DateTime<Utc>) -> Result<Vec<CalendarEvent>, FetchError>,
{
    fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, FetchError> {
        self(window_start, window_end)
    }
}
