//! Text and JSON rendering of aggregation results.

use std::fmt::Write as _;

use overlap_engine::interval::total_minutes;
use overlap_engine::time::format_hhmm;
use overlap_engine::{Bucket, DayAggregate, GroupOverlap, Interval, MonthAggregate, MonthKey, Tint};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayRow {
    #[serde(flatten)]
    aggregate: DayAggregate,
    tint: Tint,
    intensity: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthReport {
    month: String,
    total: usize,
    evenings_only: bool,
    days: Vec<DayRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayReport<'a> {
    day: &'a str,
    total: usize,
    evenings_only: bool,
    bucket_minutes: u16,
    buckets: &'a [Bucket],
    people: &'a GroupOverlap,
    shared_minutes: u32,
    best_window: Option<Interval>,
}

fn filter_label(evenings_only: bool) -> &'static str {
    if evenings_only {
        "evenings only"
    } else {
        "all day"
    }
}

fn tint_label(tint: Tint) -> &'static str {
    match tint {
        Tint::Busy => "busy",
        Tint::Some => "some",
        Tint::Free => "free",
    }
}

fn format_interval(iv: &Interval) -> String {
    format!("{}-{}", format_hhmm(iv.start), format_hhmm(iv.end))
}

fn format_intervals(intervals: &[Interval]) -> String {
    if intervals.is_empty() {
        return "(busy)".to_string();
    }
    let listed = intervals
        .iter()
        .map(format_interval)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}  [{} min]", listed, total_minutes(intervals))
}

/// Every day of the month, filling days nobody mentioned with zero.
pub fn month_text(agg: &MonthAggregate, month: &MonthKey, evenings_only: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} people, {})",
        agg.month,
        agg.total,
        filter_label(evenings_only)
    );
    for day in month.days() {
        let d = agg.day(&day.to_string());
        let _ = writeln!(
            out,
            "{}  {:>3}/{:<3} {:<4} {}",
            d.day_key,
            d.free_count,
            d.total,
            tint_label(d.tint()),
            "#".repeat(usize::from(d.intensity()))
        );
    }
    out
}

pub fn month_json(agg: &MonthAggregate, month: &MonthKey, evenings_only: bool) -> serde_json::Result<String> {
    let days = month
        .days()
        .into_iter()
        .map(|day| {
            let aggregate = agg.day(&day.to_string());
            DayRow {
                tint: aggregate.tint(),
                intensity: aggregate.intensity(),
                aggregate,
            }
        })
        .collect();
    serde_json::to_string_pretty(&MonthReport {
        month: agg.month.clone(),
        total: agg.total,
        evenings_only,
        days,
    })
}

pub fn day_text(
    day: &str,
    evenings_only: bool,
    bucket_minutes: u16,
    buckets: &[Bucket],
    overlap: &GroupOverlap,
) -> String {
    let total = overlap.per_person.len();
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} people, {})", day, total, filter_label(evenings_only));

    let _ = writeln!(out, "\nTimeline ({}-minute buckets)", bucket_minutes);
    for b in buckets {
        let _ = writeln!(
            out,
            "{}-{}  {:>3}/{:<3} {}",
            format_hhmm(b.start_mins),
            format_hhmm(b.end_mins),
            b.free_count,
            total,
            "#".repeat(b.free_count)
        );
    }
    let best_bucket = buckets.iter().map(|b| b.free_count).max().unwrap_or(0);
    let _ = writeln!(out, "Best bucket count: {}/{}", best_bucket, total);

    let width = overlap
        .per_person
        .iter()
        .map(|p| p.name.chars().count())
        .chain(["Everyone".len(), "Best window".len()])
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "\nPeople");
    for p in &overlap.per_person {
        let _ = writeln!(out, "{:<width$}  {}", p.name, format_intervals(&p.intervals));
    }
    let everyone = if overlap.everyone.is_empty() {
        "(none)".to_string()
    } else {
        format_intervals(&overlap.everyone)
    };
    let _ = writeln!(out, "{:<width$}  {}", "Everyone", everyone);
    match overlap.best_window() {
        Some(best) => {
            let _ = writeln!(
                out,
                "{:<width$}  {} ({} min)",
                "Best window",
                format_interval(&best),
                best.len()
            );
        }
        None => {
            let _ = writeln!(out, "{:<width$}  none", "Best window");
        }
    }
    out
}

pub fn day_json(
    day: &str,
    evenings_only: bool,
    bucket_minutes: u16,
    buckets: &[Bucket],
    overlap: &GroupOverlap,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DayReport {
        day,
        total: overlap.per_person.len(),
        evenings_only,
        bucket_minutes,
        buckets,
        people: overlap,
        shared_minutes: total_minutes(&overlap.everyone),
        best_window: overlap.best_window(),
    })
}
