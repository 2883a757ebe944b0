//! Resolve one person's day override into normalized free intervals.
//!
//! The evening start is always passed in explicitly. Two people may have
//! different evening starts, and the resolver never reads a global default.

use crate::interval::normalize;
use crate::record::{DayOverride, Interval, PersonAvailabilityRecord};
use crate::time::MINUTES_PER_DAY;

/// Free intervals for a single override.
///
/// Range endpoints past midnight are clamped to 1440 before normalizing.
///
/// With `evenings_only` set, each interval's start is raised to
/// `evening_start` and whatever becomes empty is dropped. Clipping an
/// `EveningFree` day this way leaves it unchanged.
pub fn resolve_free_intervals(
    ov: &DayOverride,
    evening_start: u16,
    evenings_only: bool,
) -> Vec<Interval> {
    let resolved = match ov {
        DayOverride::None => Vec::new(),
        DayOverride::AllDayFree => vec![Interval::all_day()],
        DayOverride::EveningFree => normalize(&[Interval::new(evening_start, MINUTES_PER_DAY)]),
        DayOverride::Ranges { ranges } => {
            let intervals: Vec<Interval> = ranges.iter().copied().map(Interval::from).collect();
            normalize(&intervals)
        }
    };

    if !evenings_only {
        return resolved;
    }

    let clipped: Vec<Interval> = resolved
        .into_iter()
        .map(|i| Interval::new(i.start.max(evening_start), i.end))
        .filter(|i| i.end > i.start)
        .collect();
    normalize(&clipped)
}

/// Free intervals for `record` on `day_key`, using the record's own evening start.
pub fn resolve_for_day(
    record: &PersonAvailabilityRecord,
    day_key: &str,
    evenings_only: bool,
) -> Vec<Interval> {
    resolve_free_intervals(
        record.override_for(day_key),
        record.evening_start,
        evenings_only,
    )
}

/// True when the person has at least one free minute.
pub fn has_any_free_time(intervals: &[Interval]) -> bool {
    !intervals.is_empty()
}

/// True when some interval contains `minute` under half-open semantics.
pub fn is_free_at_minute(intervals: &[Interval], minute: u16) -> bool {
    intervals.iter().any(|i| i.contains(minute))
}
