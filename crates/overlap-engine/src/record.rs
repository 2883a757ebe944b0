//! In-memory availability model: intervals, per-day overrides, and the
//! per-person record the aggregation engine consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time::MINUTES_PER_DAY;

/// A half-open `[start, end)` range of minutes within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u16,
    pub end: u16,
}

impl Interval {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// The whole day, `[0, 1440)`.
    pub fn all_day() -> Self {
        Self::new(0, MINUTES_PER_DAY)
    }

    /// Length in minutes. Zero for degenerate or inverted intervals.
    pub fn len(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open containment: `start <= minute < end`.
    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }
}

/// A user-entered free range inside a `ranges` override.
///
/// Not required to be well formed. The resolver drops inverted entries and
/// merges overlapping ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_mins: u16,
    pub end_mins: u16,
}

impl TimeRange {
    pub fn new(start_mins: u16, end_mins: u16) -> Self {
        Self {
            start_mins,
            end_mins,
        }
    }
}

/// Endpoints past midnight are clamped to the end of the day.
impl From<TimeRange> for Interval {
    fn from(r: TimeRange) -> Self {
        Interval::new(
            r.start_mins.min(MINUTES_PER_DAY),
            r.end_mins.min(MINUTES_PER_DAY),
        )
    }
}

/// One person's declared status for one calendar day.
///
/// A day with no stored override is treated exactly like [`DayOverride::None`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DayOverride {
    /// Busy all day.
    #[default]
    None,
    /// Free for the whole day.
    AllDayFree,
    /// Free from the person's own evening start until midnight.
    EveningFree,
    /// Free during an explicit set of ranges.
    Ranges { ranges: Vec<TimeRange> },
}

impl DayOverride {
    pub fn ranges(ranges: impl IntoIterator<Item = TimeRange>) -> Self {
        DayOverride::Ranges {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DayOverride::None)
    }
}

/// One person's availability as consumed by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonAvailabilityRecord {
    /// Stable person identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Minute-of-day at which this person's evening begins.
    pub evening_start: u16,
    /// Day key (`YYYY-MM-DD`) to override. Only days that deviate from
    /// [`DayOverride::None`] need to be present.
    pub overrides: BTreeMap<String, DayOverride>,
}

impl PersonAvailabilityRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, evening_start: u16) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            evening_start,
            overrides: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach an override for one day.
    pub fn with_override(mut self, day_key: impl Into<String>, ov: DayOverride) -> Self {
        self.overrides.insert(day_key.into(), ov);
        self
    }

    /// The override for `day_key`, or `None` when no record exists for that day.
    pub fn override_for(&self, day_key: &str) -> &DayOverride {
        static BUSY: DayOverride = DayOverride::None;
        self.overrides.get(day_key).unwrap_or(&BUSY)
    }
}
