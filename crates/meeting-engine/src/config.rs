//! User scheduling preferences.
//!
//! Mirrors the calendar assistant's `config.json`:
//!
//! ```json
//! {
//!   "preferences": {
//!     "flexibleBlockPatterns": ["hold"],
//!     "deepWorkPatterns": ["focus"],
//!     "meetingPreferences": {
//!       "preferredDays": {"Wednesday-PM": 100, "Thursday": 100},
//!       "afternoonStartHour": 12,
//!       "neverAvailablePatterns": ["lunch"]
//!     }
//!   }
//! }
//! ```
//!
//! Every key is optional. Malformed values degrade to their defaults instead
//! of rejecting the whole document.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ConfigError;

const DEFAULT_AFTERNOON_START_HOUR: u32 = 12;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preferences: Preferences,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub flexible_block_patterns: Vec<String>,
    pub deep_work_patterns: Vec<String>,
    pub meeting_preferences: MeetingPreferences,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingPreferences {
    pub preferred_days: DayWeights,
    #[serde(deserialize_with = "lenient_hour")]
    pub afternoon_start_hour: u32,
    pub prefer_adjacent_to_meetings: bool,
    pub avoid_deep_work_blocks: bool,
    pub deep_work_block_usage: DeepWorkUsage,
    pub never_available_patterns: Vec<String>,
    /// Wall clock used for day-of-week and afternoon bucketing.
    #[serde(deserialize_with = "lenient_timezone")]
    pub timezone: Tz,
}

impl Default for MeetingPreferences {
    fn default() -> Self {
        Self {
            preferred_days: DayWeights::default(),
            afternoon_start_hour: DEFAULT_AFTERNOON_START_HOUR,
            prefer_adjacent_to_meetings: true,
            avoid_deep_work_blocks: true,
            deep_work_block_usage: DeepWorkUsage::End,
            never_available_patterns: Vec::new(),
            timezone: Tz::UTC,
        }
    }
}

/// Which edge of a deep-work block is offered as a fallback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum DeepWorkUsage {
    Start,
    #[default]
    End,
}

impl DeepWorkUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeepWorkUsage::Start => "start",
            DeepWorkUsage::End => "end",
        }
    }
}

impl From<String> for DeepWorkUsage {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "start" => DeepWorkUsage::Start,
            "end" => DeepWorkUsage::End,
            other => {
                tracing::warn!(value = other, "unknown deepWorkBlockUsage, using \"end\"");
                DeepWorkUsage::End
            }
        }
    }
}

/// Half of the day a slot starts in, split at `afternoonStartHour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
}

/// Day-of-week score bonuses, keyed by weekday with an optional
/// afternoon-specific override (`"Wednesday-PM"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct DayWeights {
    whole_day: [Option<i64>; 7],
    afternoon: [Option<i64>; 7],
}

impl DayWeights {
    pub fn set(&mut self, day: Weekday, part: Option<DayPart>, bonus: i64) {
        let idx = day.num_days_from_monday() as usize;
        match part {
            Some(DayPart::Afternoon) => self.afternoon[idx] = Some(bonus),
            _ => self.whole_day[idx] = Some(bonus),
        }
    }

    pub fn with(mut self, day: Weekday, part: Option<DayPart>, bonus: i64) -> Self {
        self.set(day, part, bonus);
        self
    }

    /// Bonus for a slot on `day` in `part`.
    ///
    /// Afternoon slots use the afternoon entry, falling back to the whole-day
    /// entry. Morning slots use the whole-day entry. Missing entries are 0.
    pub fn bonus(&self, day: Weekday, part: DayPart) -> i64 {
        let idx = day.num_days_from_monday() as usize;
        let specific = match part {
            DayPart::Afternoon => self.afternoon[idx],
            DayPart::Morning => None,
        };
        specific.or(self.whole_day[idx]).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.whole_day.iter().chain(&self.afternoon).all(Option::is_none)
    }
}

impl From<BTreeMap<String, Value>> for DayWeights {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut weights = DayWeights::default();
        for (key, value) in raw {
            let Some(bonus) = value.as_i64() else {
                tracing::warn!(key = %key, "ignoring non-integer preferredDays weight");
                continue;
            };
            let (day_name, part) = match key.strip_suffix("-PM") {
                Some(day) => (day, Some(DayPart::Afternoon)),
                None => (key.as_str(), None),
            };
            match weekday_named(day_name) {
                Some(day) => weights.set(day, part, bonus),
                None => tracing::warn!(key = %key, "ignoring unknown preferredDays key"),
            }
        }
        weights
    }
}

/// Full English weekday names only; `"Wed"` or `"wednesday"` are not keys.
fn weekday_named(name: &str) -> Option<Weekday> {
    let day = match name {
        "Monday" => Weekday::Mon,
        "Tuesday" => Weekday::Tue,
        "Wednesday" => Weekday::Wed,
        "Thursday" => Weekday::Thu,
        "Friday" => Weekday::Fri,
        "Saturday" => Weekday::Sat,
        "Sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

fn lenient_hour<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_u64() {
        Some(hour) if hour <= 23 => Ok(hour as u32),
        _ => {
            tracing::warn!(value = %value, "invalid afternoonStartHour, using 12");
            Ok(DEFAULT_AFTERNOON_START_HOUR)
        }
    }
}

fn lenient_timezone<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_str().map(str::parse::<Tz>) {
        Some(Ok(tz)) => Ok(tz),
        _ => {
            tracing::warn!(value = %value, "invalid timezone, using UTC");
            Ok(Tz::UTC)
        }
    }
}
