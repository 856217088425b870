//! Fallback slots carved out of deep-work blocks.

use crate::config::DeepWorkUsage;
use crate::event::{CalendarEvent, Interval};

/// Offer one slot per deep-work block long enough to hold `duration_minutes`,
/// taken from the block's start or end edge. Shorter blocks are skipped, and
/// a non-positive duration yields nothing.
pub fn extract_deep_work_slots(
    blocks: &[&CalendarEvent],
    duration_minutes: i64,
    usage: DeepWorkUsage,
) -> Vec<Interval> {
    blocks
        .iter()
        .filter(|block| block.duration_minutes() >= duration_minutes)
        .filter_map(|block| match usage {
            DeepWorkUsage::End => Interval::ending_at(block.end, duration_minutes),
            DeepWorkUsage::Start => Interval::starting_at(block.start, duration_minutes),
        })
        .collect()
}
