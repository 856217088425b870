//! Per-day breakdown of calendar blocks by type.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, BlockType};
use crate::config::Preferences;
use crate::error::Result;
use crate::event::CalendarEvent;
use crate::source::EventSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Minutes of the block that fall on the analyzed day.
    pub duration: i64,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAnalysis {
    pub date: NaiveDate,
    /// Sum of all block durations, in minutes.
    pub total_blocked: i64,
    pub blocks: Vec<TimeBlock>,
    pub flexible_blocks: Vec<TimeBlock>,
}

/// Midnight-to-midnight bounds of `date` on the `tz` wall clock.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(date, tz);
    let end = date
        .succ_opt()
        .map(|next| local_midnight(next, tz))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Fetch the events of `date` and classify each one.
pub fn analyze_day<S>(source: &S, date: NaiveDate, preferences: &Preferences) -> Result<DayAnalysis>
where
    S: EventSource + ?Sized,
{
    let (day_start, day_end) = day_bounds(date, preferences.meeting_preferences.timezone);
    let events = source.fetch_events(day_start, day_end)?;
    Ok(analyze_events(date, day_start, day_end, &events, preferences))
}

fn analyze_events(
    date: NaiveDate,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    events: &[CalendarEvent],
    preferences: &Preferences,
) -> DayAnalysis {
    let mut on_day: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.start < day_end && e.end > day_start)
        .collect();
    on_day.sort_by_key(|e| e.start);

    let blocks: Vec<TimeBlock> = on_day
        .into_iter()
        .map(|event| {
            let start = event.start.max(day_start);
            let end = event.end.min(day_end);
            TimeBlock {
                start,
                end,
                duration: (end - start).num_minutes(),
                block_type: classify(event, preferences),
                summary: event.summary.clone(),
            }
        })
        .collect();

    let total_blocked = blocks.iter().map(|b| b.duration).sum();
    let flexible_blocks = blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Flexible)
        .cloned()
        .collect();

    DayAnalysis {
        date,
        total_blocked,
        blocks,
        flexible_blocks,
    }
}
