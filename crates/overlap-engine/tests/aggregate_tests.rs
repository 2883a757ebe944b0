//! Tests for month aggregation, day buckets, and group overlap.

use overlap_engine::aggregate::{
    aggregate_month, compute_day_buckets, group_overlap, Tint, DEFAULT_BUCKET_MINUTES,
};
use overlap_engine::{
    DayOverride, Interval, MonthKey, OverlapError, PersonAvailabilityRecord, TimeRange,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn person(id: &str, evening_start: u16) -> PersonAvailabilityRecord {
    PersonAvailabilityRecord::new(id, id.to_uppercase(), evening_start)
}

fn ranges(pairs: &[(u16, u16)]) -> DayOverride {
    DayOverride::ranges(pairs.iter().map(|&(s, e)| TimeRange::new(s, e)))
}

fn march() -> MonthKey {
    "2026-03".parse().unwrap()
}

const DAY: &str = "2026-03-14";

// ── aggregate_month ─────────────────────────────────────────────────────────

#[test]
fn month_counts_people_with_any_free_time() {
    // A is free all day, B is busy → 1 of 2 free.
    let a = person("a", 1050).with_override(DAY, DayOverride::AllDayFree);
    let b = person("b", 1050).with_override(DAY, DayOverride::None);

    let agg = aggregate_month(&[a, b], &march(), false);

    assert_eq!(agg.month, "2026-03");
    assert_eq!(agg.total, 2);
    let day = &agg.by_day[DAY];
    assert_eq!(day.free_count, 1);
    assert_eq!(day.total, 2);
    assert_eq!(day.tint(), Tint::Some);
}

#[test]
fn month_only_materializes_mentioned_days() {
    let a = person("a", 1050)
        .with_override("2026-03-01", DayOverride::AllDayFree)
        .with_override("2026-04-01", DayOverride::AllDayFree);
    let b = person("b", 1050).with_override("2026-03-20", DayOverride::EveningFree);

    let agg = aggregate_month(&[a, b], &march(), false);

    let keys: Vec<&str> = agg.by_day.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["2026-03-01", "2026-03-20"]);
}

#[test]
fn month_missing_day_reads_as_zero() {
    let a = person("a", 1050).with_override("2026-03-01", DayOverride::AllDayFree);
    let agg = aggregate_month(&[a], &march(), false);

    let missing = agg.day("2026-03-02");
    assert_eq!(missing.free_count, 0);
    assert_eq!(missing.total, 1);
    assert_eq!(missing.tint(), Tint::Busy);
    assert_eq!(missing.intensity(), 0);
}

#[test]
fn month_prefix_match_excludes_neighbouring_months() {
    // "2026-03" must not pick up "2026-030..." style keys or other months.
    let a = person("a", 1050).with_override("2026-02-28", DayOverride::AllDayFree);
    let agg = aggregate_month(&[a], &march(), false);
    assert!(agg.by_day.is_empty());
}

#[test]
fn month_evenings_only_counts_only_evening_time() {
    // A is free in the morning only, B is free after their evening start.
    let a = person("a", 1050).with_override(DAY, ranges(&[(540, 600)]));
    let b = person("b", 1080).with_override(DAY, DayOverride::EveningFree);

    let all_day = aggregate_month(&[a.clone(), b.clone()], &march(), false);
    let evenings = aggregate_month(&[a, b], &march(), true);

    assert_eq!(all_day.by_day[DAY].free_count, 2);
    assert_eq!(evenings.by_day[DAY].free_count, 1);
}

#[test]
fn month_with_no_people_is_empty() {
    let none: Vec<PersonAvailabilityRecord> = Vec::new();
    let agg = aggregate_month(&none, &march(), false);
    assert_eq!(agg.total, 0);
    assert!(agg.by_day.is_empty());
    assert_eq!(agg.day(DAY).ratio(), 0.0);
}

#[test]
fn month_total_tracks_included_set_size() {
    let people: Vec<PersonAvailabilityRecord> = (0..5)
        .map(|i| person(&format!("p{}", i), 1050).with_override(DAY, DayOverride::AllDayFree))
        .collect();

    for n in 0..=people.len() {
        let agg = aggregate_month(&people[..n], &march(), false);
        assert_eq!(agg.total, n);
        for day in agg.by_day.values() {
            assert_eq!(day.total, n);
            assert!(day.free_count <= day.total);
        }
    }
}

#[test]
fn month_accepts_borrowed_records() {
    let a = person("a", 1050).with_override(DAY, DayOverride::AllDayFree);
    let refs = vec![&a];
    let agg = aggregate_month(&refs, &march(), false);
    assert_eq!(agg.by_day[DAY].tint(), Tint::Free);
    assert_eq!(agg.by_day[DAY].intensity(), 3);
}

#[test]
fn intensity_levels_follow_ratio() {
    let people: Vec<PersonAvailabilityRecord> = (0..10)
        .map(|i| {
            let ov = if i < 3 {
                DayOverride::AllDayFree
            } else {
                DayOverride::None
            };
            person(&format!("p{}", i), 1050).with_override(DAY, ov)
        })
        .collect();

    let agg = aggregate_month(&people, &march(), false);
    // 3/10 = 0.3 → level 1
    assert_eq!(agg.by_day[DAY].intensity(), 1);

    let agg = aggregate_month(&people[..5], &march(), false);
    // 3/5 = 0.6 → level 2
    assert_eq!(agg.by_day[DAY].intensity(), 2);
}

// ── compute_day_buckets ─────────────────────────────────────────────────────

#[test]
fn buckets_cover_the_day() {
    let buckets = compute_day_buckets::<PersonAvailabilityRecord>(&[], DAY, false, 30).unwrap();
    assert_eq!(buckets.len(), 48);
    assert_eq!(buckets[0].start_mins, 0);
    assert_eq!(buckets[47].end_mins, 1440);
    assert!(buckets.iter().all(|b| b.free_count == 0));
}

#[test]
fn buckets_report_evening_range() {
    // Free 18:00-20:00 → buckets 18:00..20:00 count 1, everything else 0.
    let a = person("a", 1050).with_override(DAY, ranges(&[(1080, 1200)]));
    let buckets = compute_day_buckets(&[a], DAY, false, DEFAULT_BUCKET_MINUTES).unwrap();

    for b in &buckets {
        let expected = usize::from(b.start_mins >= 1080 && b.end_mins <= 1200);
        assert_eq!(
            b.free_count, expected,
            "bucket {}-{}",
            b.start_mins, b.end_mins
        );
    }
    assert_eq!(buckets.iter().filter(|b| b.free_count == 1).count(), 4);
}

#[test]
fn buckets_sample_the_midpoint_only() {
    // 10 minutes of free time at the start of a 60-minute bucket misses the
    // midpoint (minute 30), so the bucket reports nobody.
    let a = person("a", 1050).with_override(DAY, ranges(&[(0, 10)]));
    let buckets = compute_day_buckets(&[a], DAY, false, 60).unwrap();
    assert_eq!(buckets[0].free_count, 0);
}

#[test]
fn buckets_clip_last_bucket() {
    let buckets = compute_day_buckets::<PersonAvailabilityRecord>(&[], DAY, false, 100).unwrap();
    assert_eq!(buckets.len(), 15);
    let last = buckets.last().unwrap();
    assert_eq!((last.start_mins, last.end_mins), (1400, 1440));
}

#[test]
fn buckets_ignore_range_minutes_past_midnight() {
    let a = person("a", 1050).with_override(DAY, ranges(&[(1000, 2000)]));
    let buckets = compute_day_buckets(&[a], DAY, false, 1000).unwrap();

    // [1000, 1440) samples minute 1500, which lies outside the day.
    assert_eq!(buckets.len(), 2);
    assert_eq!((buckets[1].start_mins, buckets[1].end_mins), (1000, 1440));
    assert_eq!(buckets[1].free_count, 0);
}

#[test]
fn buckets_count_multiple_people() {
    let a = person("a", 1050).with_override(DAY, DayOverride::AllDayFree);
    let b = person("b", 1050).with_override(DAY, DayOverride::EveningFree);
    let buckets = compute_day_buckets(&[a, b], DAY, false, 30).unwrap();

    // 17:00-17:30 midpoint 17:15 → only A; 17:30-18:00 midpoint 17:45 → both.
    assert_eq!(buckets[34].free_count, 1);
    assert_eq!(buckets[35].free_count, 2);
}

#[test]
fn buckets_respect_evenings_only() {
    let a = person("a", 1050).with_override(DAY, DayOverride::AllDayFree);
    let buckets = compute_day_buckets(&[a], DAY, true, 30).unwrap();
    assert_eq!(buckets[34].free_count, 0);
    assert_eq!(buckets[35].free_count, 1);
}

#[test]
fn zero_width_bucket_is_rejected() {
    let err = compute_day_buckets::<PersonAvailabilityRecord>(&[], DAY, false, 0).unwrap_err();
    assert!(matches!(err, OverlapError::InvalidBucketWidth));
}

// ── group_overlap ───────────────────────────────────────────────────────────

#[test]
fn overlap_of_two_ranges() {
    let a = person("a", 1050).with_override(DAY, ranges(&[(540, 600)]));
    let b = person("b", 1050).with_override(DAY, ranges(&[(570, 660)]));

    let overlap = group_overlap(&[a, b], DAY, false);

    assert_eq!(overlap.per_person.len(), 2);
    assert_eq!(overlap.per_person[0].id, "a");
    assert_eq!(overlap.per_person[1].intervals, vec![Interval::new(570, 660)]);
    assert_eq!(overlap.everyone, vec![Interval::new(570, 600)]);
    assert_eq!(overlap.best_window(), Some(Interval::new(570, 600)));
}

#[test]
fn overlap_with_busy_person_is_empty() {
    let a = person("a", 1050).with_override(DAY, DayOverride::AllDayFree);
    let b = person("b", 1050);

    let overlap = group_overlap(&[a, b], DAY, false);
    assert!(overlap.everyone.is_empty());
    assert_eq!(overlap.best_window(), None);
}

#[test]
fn overlap_of_nobody_is_empty() {
    let overlap = group_overlap::<PersonAvailabilityRecord>(&[], DAY, false);
    assert!(overlap.per_person.is_empty());
    assert!(overlap.everyone.is_empty());
}

#[test]
fn best_window_prefers_longest_then_first() {
    let a = person("a", 1050).with_override(
        DAY,
        ranges(&[(60, 120), (300, 420), (600, 720)]),
    );
    let overlap = group_overlap(&[a], DAY, false);
    // 300-420 and 600-720 are both 120 minutes; the first wins.
    assert_eq!(overlap.best_window(), Some(Interval::new(300, 420)));
}

#[test]
fn overlap_respects_each_persons_evening() {
    let a = person("a", 17 * 60).with_override(DAY, DayOverride::AllDayFree);
    let b = person("b", 19 * 60).with_override(DAY, DayOverride::AllDayFree);
    let overlap = group_overlap(&[a, b], DAY, true);
    assert_eq!(overlap.everyone, vec![Interval::new(1140, 1440)]);
}
