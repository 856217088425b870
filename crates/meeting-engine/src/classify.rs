//! Label calendar events by how they may be treated when scheduling.
//!
//! Classification is an ordered chain of rules; the first rule that matches
//! decides the label. Explicit provider tags come first, then the configured
//! summary patterns, then the presence of attendees.

use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::event::{CalendarEvent, EventType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    DeepWork,
    Flexible,
    Meeting,
    OutOfOffice,
    Unknown,
}

/// What a rule gets to look at.
struct Subject<'a> {
    event: &'a CalendarEvent,
    summary: String,
    preferences: &'a Preferences,
}

struct Rule {
    label: BlockType,
    matches: fn(&Subject<'_>) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        label: BlockType::DeepWork,
        matches: is_focus_time,
    },
    Rule {
        label: BlockType::OutOfOffice,
        matches: is_out_of_office,
    },
    Rule {
        label: BlockType::Flexible,
        matches: matches_flexible_pattern,
    },
    Rule {
        label: BlockType::DeepWork,
        matches: matches_deep_work_pattern,
    },
    Rule {
        label: BlockType::Meeting,
        matches: has_attendees,
    },
];

fn is_focus_time(s: &Subject<'_>) -> bool {
    s.event.event_type == EventType::FocusTime
}

fn is_out_of_office(s: &Subject<'_>) -> bool {
    s.event.event_type == EventType::OutOfOffice
}

fn matches_flexible_pattern(s: &Subject<'_>) -> bool {
    summary_matches(&s.summary, &s.preferences.flexible_block_patterns)
}

fn matches_deep_work_pattern(s: &Subject<'_>) -> bool {
    summary_matches(&s.summary, &s.preferences.deep_work_patterns)
}

fn has_attendees(s: &Subject<'_>) -> bool {
    !s.event.attendees.is_empty()
}

/// Classify one event. Pure function of the event and the preferences.
pub fn classify(event: &CalendarEvent, preferences: &Preferences) -> BlockType {
    let subject = Subject {
        event,
        summary: event.summary.to_lowercase(),
        preferences,
    };
    RULES
        .iter()
        .find(|rule| (rule.matches)(&subject))
        .map(|rule| rule.label)
        .unwrap_or(BlockType::Unknown)
}

/// Whether the event's summary matches one of the never-available patterns.
///
/// Checked before [`classify`] by callers; a match overrides any other label.
pub fn is_never_available(event: &CalendarEvent, preferences: &Preferences) -> bool {
    let summary = event.summary.to_lowercase();
    summary_matches(
        &summary,
        &preferences.meeting_preferences.never_available_patterns,
    )
}

/// Case-insensitive substring match against any pattern. Empty patterns are
/// ignored rather than matching everything.
fn summary_matches(summary_lower: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| summary_lower.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patterns_never_match() {
        assert!(!summary_matches("standup", &[String::new()]));
        assert!(summary_matches("team standup", &["STAND".to_string()]));
    }
}
