//! # meeting-engine
//!
//! Deterministic meeting-slot discovery and preference scoring for AI calendar
//! agents.
//!
//! Given a search window, a snapshot of normalized calendar events, and the
//! user's scheduling preferences, the engine finds free gaps, scores them by
//! day-of-week preference and adjacency to existing meetings, and falls back
//! to the edges of deep-work blocks only when ordinary free time runs out.
//! Everything here is synchronous and pure: the same inputs always produce the
//! same ranked output.
//!
//! ## Modules
//!
//! - [`classify`]: Label events as deep-work, flexible, meeting, out-of-office, unknown
//! - [`freebusy`]: Lazy free-slot search between busy intervals
//! - [`scoring`]: Day-of-week and adjacency scoring for candidate slots
//! - [`deep_work`]: Fallback slots at the start or end of deep-work blocks
//! - [`planner`]: Two-tier search-and-rank over all of the above
//! - [`analysis`]: Per-day breakdown of calendar blocks
//! - [`availability`]: Conflict check for a proposed time range
//! - [`summary`]: Meeting count, hours, and top attendees over a period
//! - [`source`]: The event-fetch boundary (`EventSource`, `EventFeed`)
//! - [`config`]: User preferences with lenient defaults
//! - [`event`]: Normalized events and intervals
//! - [`error`]: Error types

pub mod analysis;
pub mod availability;
pub mod classify;
pub mod config;
pub mod deep_work;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod planner;
pub mod scoring;
pub mod source;
pub mod summary;

pub use analysis::{analyze_day, DayAnalysis, TimeBlock};
pub use availability::{check_availability, Availability};
pub use classify::{classify, is_never_available, BlockType};
pub use config::{Config, DayPart, DayWeights, DeepWorkUsage, MeetingPreferences, Preferences};
pub use deep_work::extract_deep_work_slots;
pub use error::{ConfigError, FetchError, PlanError};
pub use event::{Attendee, CalendarEvent, EventType, Interval};
pub use freebusy::{find_free_slots, FreeSlots};
pub use planner::{plan, plan_meeting_times, CandidateSlot, MeetingPlan, MeetingRequest, SlotKind};
pub use scoring::{score_slot, SlotScore};
pub use source::{EventFeed, EventSource, FeedDocument};
pub use summary::{summarize_meetings, AttendeeCount, MeetingSummary};
