//! Group aggregation over many people's availability.
//!
//! Given the currently included records, computes:
//!
//! - per-day free counts for a month (heatmap),
//! - per-bucket free counts for one day (timeline),
//! - the exact shared free intervals for one day (overlap window).
//!
//! Everything is recomputed from the records on each call. Nothing is cached
//! and nothing is mutated in place.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};
use crate::interval::intersect_all;
use crate::record::{Interval, PersonAvailabilityRecord};
use crate::resolve::{has_any_free_time, is_free_at_minute, resolve_for_day};
use crate::time::{MonthKey, MINUTES_PER_DAY};

/// Bucket width used by the day timeline when the caller has no preference.
pub const DEFAULT_BUCKET_MINUTES: u16 = 30;

/// Free-count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    pub day_key: String,
    /// People with any free minute that day (under the active filter).
    pub free_count: usize,
    /// Size of the included set.
    pub total: usize,
}

/// Coarse colouring of a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tint {
    /// Nobody is free.
    Busy,
    /// Some but not all are free.
    Some,
    /// Everyone is free.
    Free,
}

impl DayAggregate {
    /// Fraction of the group that is free, `0.0` for an empty group.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.free_count as f64 / self.total as f64
        }
    }

    pub fn tint(&self) -> Tint {
        let ratio = self.ratio();
        if ratio <= 0.0 {
            Tint::Busy
        } else if ratio >= 1.0 {
            Tint::Free
        } else {
            Tint::Some
        }
    }

    /// Heat level 0-3 for the month grid.
    pub fn intensity(&self) -> u8 {
        let ratio = self.ratio();
        if ratio <= 0.0 {
            0
        } else if ratio <= 0.33 {
            1
        } else if ratio <= 0.66 {
            2
        } else {
            3
        }
    }
}

/// Day aggregates for one month.
///
/// Only days that at least one record mentions are materialized. Use
/// [`MonthAggregate::day`] to read any day with a zero fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAggregate {
    pub month: String,
    pub total: usize,
    pub by_day: BTreeMap<String, DayAggregate>,
}

impl MonthAggregate {
    /// The aggregate for `day_key`, or a zero count when no record mentions it.
    pub fn day(&self, day_key: &str) -> DayAggregate {
        self.by_day
            .get(day_key)
            .cloned()
            .unwrap_or_else(|| DayAggregate {
                day_key: day_key.to_string(),
                free_count: 0,
                total: self.total,
            })
    }
}

/// Free-count sampled at the midpoint of `[start_mins, end_mins)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub start_mins: u16,
    pub end_mins: u16,
    pub free_count: usize,
}

/// One person's resolved free intervals for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonIntervals {
    pub id: String,
    pub name: String,
    pub intervals: Vec<Interval>,
}

/// Per-person intervals for a day plus their group intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOverlap {
    pub per_person: Vec<PersonIntervals>,
    /// Time when every included person is free.
    pub everyone: Vec<Interval>,
}

impl GroupOverlap {
    /// Longest shared interval. The first one wins among equal lengths.
    pub fn best_window(&self) -> Option<Interval> {
        let mut best: Option<Interval> = None;
        for iv in &self.everyone {
            if best.map_or(true, |b| iv.len() > b.len()) {
                best = Some(*iv);
            }
        }
        best
    }
}

/// Count, for each day of `month` that any record mentions, how many people
/// have some free time.
///
/// A person counts as free on a day if they have any free minute that
/// satisfies the filter. `total` is always `records.len()`.
pub fn aggregate_month<R: Borrow<PersonAvailabilityRecord>>(
    records: &[R],
    month: &MonthKey,
    evenings_only: bool,
) -> MonthAggregate {
    let people = as_people(records);
    let total = people.len();
    tracing::trace!(%month, total, evenings_only, "aggregating month");

    let mut by_day: BTreeMap<String, DayAggregate> = BTreeMap::new();
    for record in &people {
        for day_key in record.overrides.keys() {
            if !month.contains(day_key) || by_day.contains_key(day_key) {
                continue;
            }
            let free_count = people
                .iter()
                .filter(|r| has_any_free_time(&resolve_for_day(r, day_key, evenings_only)))
                .count();
            by_day.insert(
                day_key.clone(),
                DayAggregate {
                    day_key: day_key.clone(),
                    free_count,
                    total,
                },
            );
        }
    }

    MonthAggregate {
        month: month.to_string(),
        total,
        by_day,
    }
}

/// Split the day into fixed-width buckets and count people free at each
/// bucket's midpoint (`start + bucket_minutes / 2`).
///
/// This is a sampling approximation. A free interval shorter than the bucket
/// that misses its midpoint does not show up in that bucket. The last bucket
/// is clipped to 1440 when the width does not divide the day evenly.
///
/// # Errors
/// Returns [`OverlapError::InvalidBucketWidth`] when `bucket_minutes` is zero.
pub fn compute_day_buckets<R: Borrow<PersonAvailabilityRecord>>(
    records: &[R],
    day_key: &str,
    evenings_only: bool,
    bucket_minutes: u16,
) -> Result<Vec<Bucket>> {
    if bucket_minutes == 0 {
        return Err(OverlapError::InvalidBucketWidth);
    }
    tracing::trace!(day_key, bucket_minutes, evenings_only, "computing day buckets");

    let resolved: Vec<Vec<Interval>> = as_people(records)
        .into_iter()
        .map(|r| resolve_for_day(r, day_key, evenings_only))
        .collect();

    let mut buckets = Vec::with_capacity(usize::from(MINUTES_PER_DAY.div_ceil(bucket_minutes)));
    let mut start: u16 = 0;
    while start < MINUTES_PER_DAY {
        let mid = start.saturating_add(bucket_minutes / 2);
        let free_count = resolved
            .iter()
            .filter(|intervals| is_free_at_minute(intervals, mid))
            .count();
        let end = start.saturating_add(bucket_minutes).min(MINUTES_PER_DAY);
        buckets.push(Bucket {
            start_mins: start,
            end_mins: end,
            free_count,
        });
        start = end;
    }

    Ok(buckets)
}

/// Resolve every record for `day_key` and intersect the results.
///
/// An empty record set has no shared time, so `everyone` is empty.
pub fn group_overlap<R: Borrow<PersonAvailabilityRecord>>(
    records: &[R],
    day_key: &str,
    evenings_only: bool,
) -> GroupOverlap {
    let per_person: Vec<PersonIntervals> = as_people(records)
        .into_iter()
        .map(|r| PersonIntervals {
            id: r.id.clone(),
            name: r.name.clone(),
            intervals: resolve_for_day(r, day_key, evenings_only),
        })
        .collect();

    let lists: Vec<&[Interval]> = per_person.iter().map(|p| p.intervals.as_slice()).collect();
    let everyone = intersect_all(&lists);

    GroupOverlap {
        per_person,
        everyone,
    }
}

fn as_people<R: Borrow<PersonAvailabilityRecord>>(records: &[R]) -> Vec<&PersonAvailabilityRecord> {
    records.iter().map(Borrow::borrow).collect()
}
