//! Two-tier meeting-time planning.
//!
//! Tier 1 looks for ordinary free gaps and ranks them by preference score.
//! Only when tier 1 cannot fill the requested number of suggestions does tier 2
//! offer slots carved from deep-work blocks, at a fixed lower score and always
//! after every tier-1 candidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, is_never_available, BlockType};
use crate::config::{DeepWorkUsage, Preferences};
use crate::deep_work::extract_deep_work_slots;
use crate::error::{PlanError, Result};
use crate::event::{CalendarEvent, Interval};
use crate::freebusy::find_free_slots;
use crate::scoring::{score_slot, SlotScore, DEEP_WORK_SCORE};
use crate::source::EventSource;

/// A request for meeting-time suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub max_suggestions: usize,
}

impl MeetingRequest {
    pub fn new(
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        duration_minutes: i64,
        max_suggestions: usize,
    ) -> Self {
        Self {
            window_start,
            window_end,
            duration_minutes,
            max_suggestions,
        }
    }

    /// Reject requests no slot could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(PlanError::InvalidRequest(format!(
                "duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        if self.window_end <= self.window_start {
            return Err(PlanError::InvalidRequest(format!(
                "window end {} is not after window start {}",
                self.window_end.to_rfc3339(),
                self.window_start.to_rfc3339()
            )));
        }
        Ok(())
    }

    fn window(&self) -> Interval {
        Interval {
            start: self.window_start,
            end: self.window_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotKind {
    Free,
    DeepWork,
}

/// One suggested meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    #[serde(rename = "type")]
    pub kind: SlotKind,
    pub score: i64,
    pub reason: String,
}

impl CandidateSlot {
    fn free(slot: &Interval, score: SlotScore) -> Self {
        let reason = if score.adjacent {
            "Completely free (adjacent to meetings)"
        } else {
            "Completely free"
        };
        Self {
            start: slot.start,
            end: slot.end,
            duration_minutes: slot.duration_minutes(),
            kind: SlotKind::Free,
            score: score.value,
            reason: reason.to_string(),
        }
    }

    fn deep_work(slot: &Interval, usage: DeepWorkUsage) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
            duration_minutes: slot.duration_minutes(),
            kind: SlotKind::DeepWork,
            score: DEEP_WORK_SCORE,
            reason: format!("Deep work block ({} of block)", usage.as_str()),
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Ranked suggestions plus how many candidates were found in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingPlan {
    pub suggestions: Vec<CandidateSlot>,
    /// Tier-1 free slots plus tier-2 deep-work slots (0 when tier 2 did not run).
    pub total_found: usize,
    /// Whether any deep-work slot made it into `suggestions`.
    pub used_deep_work: bool,
}

/// Events grouped by how the planner treats them.
struct Partition<'a> {
    /// Everything that is neither deep work nor never-available.
    busy: Vec<&'a CalendarEvent>,
    deep_work: Vec<&'a CalendarEvent>,
    never_available: Vec<&'a CalendarEvent>,
}

impl<'a> Partition<'a> {
    fn new(events: &'a [CalendarEvent], preferences: &Preferences) -> Self {
        let mut partition = Partition {
            busy: Vec::new(),
            deep_work: Vec::new(),
            never_available: Vec::new(),
        };
        for event in events {
            if is_never_available(event, preferences) {
                partition.never_available.push(event);
            } else if classify(event, preferences) == BlockType::DeepWork {
                partition.deep_work.push(event);
            } else {
                partition.busy.push(event);
            }
        }
        partition
    }

    /// Intervals no suggestion may overlap.
    fn obstructions(&self) -> Vec<Interval> {
        self.busy
            .iter()
            .chain(&self.never_available)
            .filter_map(|e| e.interval())
            .collect()
    }
}

/// Fetch events for the request window from `source` and plan against them.
///
/// The request is validated before anything is fetched. A fetch failure is
/// returned unchanged as [`PlanError::Upstream`].
pub fn plan_meeting_times<S>(
    source: &S,
    request: &MeetingRequest,
    preferences: &Preferences,
) -> Result<MeetingPlan>
where
    S: EventSource + ?Sized,
{
    request.validate()?;
    let events = source.fetch_events(request.window_start, request.window_end)?;
    plan(request, &events, preferences)
}

/// Plan meeting times against an already-fetched event snapshot.
pub fn plan(
    request: &MeetingRequest,
    events: &[CalendarEvent],
    preferences: &Preferences,
) -> Result<MeetingPlan> {
    request.validate()?;
    let meeting_prefs = &preferences.meeting_preferences;
    let max = request.max_suggestions;

    let partition = Partition::new(events, preferences);
    tracing::debug!(
        busy = partition.busy.len(),
        deep_work = partition.deep_work.len(),
        never_available = partition.never_available.len(),
        "partitioned events"
    );
    let obstructions = partition.obstructions();

    // Tier 1: ordinary free gaps.
    let free: Vec<Interval> = find_free_slots(
        &obstructions,
        request.window_start,
        request.window_end,
        request.duration_minutes,
    )
    .collect();
    let tier1_count = free.len();

    let mut suggestions: Vec<CandidateSlot> = free
        .iter()
        .take(max.saturating_mul(2))
        .map(|slot| CandidateSlot::free(slot, score_slot(slot, &partition.busy, meeting_prefs)))
        .collect();
    // Stable: equal scores keep discovery order.
    suggestions.sort_by(|a, b| b.score.cmp(&a.score));

    if suggestions.len() >= max {
        suggestions.truncate(max);
        tracing::debug!(found = tier1_count, "tier 1 satisfied the request");
        return Ok(MeetingPlan {
            suggestions,
            total_found: tier1_count,
            used_deep_work: false,
        });
    }

    // Tier 2: deep-work fallback.
    let mut tier2_count = 0;
    if meeting_prefs.avoid_deep_work_blocks && !partition.deep_work.is_empty() {
        let window = request.window();
        let usage = meeting_prefs.deep_work_block_usage;
        let fallback: Vec<Interval> =
            extract_deep_work_slots(&partition.deep_work, request.duration_minutes, usage)
                .into_iter()
                .filter(|slot| window.contains(slot))
                .filter(|slot| !obstructions.iter().any(|busy| busy.overlaps(slot)))
                .collect();
        tier2_count = fallback.len();
        tracing::debug!(
            tier1 = tier1_count,
            tier2 = tier2_count,
            usage = usage.as_str(),
            "falling back to deep-work blocks"
        );
        suggestions.extend(
            fallback
                .iter()
                .map(|slot| CandidateSlot::deep_work(slot, usage)),
        );
    }

    suggestions.truncate(max);
    let used_deep_work = suggestions.iter().any(|s| s.kind == SlotKind::DeepWork);

    Ok(MeetingPlan {
        suggestions,
        total_found: tier1_count + tier2_count,
        used_deep_work,
    })
}
