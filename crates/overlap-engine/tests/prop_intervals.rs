//! Property-based tests for the interval algebra, the resolver, and the
//! aggregation engine using proptest.
//!
//! Interval results are compared against a brute-force minute mask, so the
//! properties hold for set semantics and not just on hand-picked examples.

use overlap_engine::aggregate::{aggregate_month, compute_day_buckets, group_overlap};
use overlap_engine::interval::{intersect_all, intersect_two, normalize};
use overlap_engine::resolve::resolve_free_intervals;
use overlap_engine::{DayOverride, Interval, MonthKey, PersonAvailabilityRecord, TimeRange};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Any interval inside the day, including degenerate and inverted ones.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0u16..=1440, 0u16..=1440).prop_map(|(s, e)| Interval::new(s, e))
}

fn arb_list() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..8)
}

fn arb_override() -> impl Strategy<Value = DayOverride> {
    prop_oneof![
        Just(DayOverride::None),
        Just(DayOverride::AllDayFree),
        Just(DayOverride::EveningFree),
        prop::collection::vec((0u16..=1440, 0u16..=1440), 0..5).prop_map(|pairs| {
            DayOverride::ranges(pairs.into_iter().map(|(s, e)| TimeRange::new(s, e)))
        }),
    ]
}

fn arb_evening() -> impl Strategy<Value = u16> {
    0u16..=1440
}

/// A group of people, each with an override on one of the first few days of
/// March 2026.
fn arb_people() -> impl Strategy<Value = Vec<PersonAvailabilityRecord>> {
    prop::collection::vec(
        (arb_evening(), prop::collection::vec((1u32..=5, arb_override()), 0..4)),
        0..6,
    )
    .prop_map(|people| {
        people
            .into_iter()
            .enumerate()
            .map(|(i, (evening, days))| {
                days.into_iter().fold(
                    PersonAvailabilityRecord::new(format!("p{}", i), format!("Person {}", i), evening),
                    |rec, (day, ov)| rec.with_override(format!("2026-03-{:02}", day), ov),
                )
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mask(intervals: &[Interval]) -> Vec<bool> {
    let mut minutes = vec![false; 1440];
    for iv in intervals {
        for m in iv.start..iv.end.min(1440) {
            minutes[usize::from(m)] = true;
        }
    }
    minutes
}

fn is_canonical(intervals: &[Interval]) -> bool {
    intervals.iter().all(|i| i.start < i.end && i.end <= 1440)
        && intervals.windows(2).all(|w| w[0].end < w[1].start)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: normalize yields canonical form covering the same minutes
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn normalize_is_canonical_and_lossless(list in arb_list()) {
        let n = normalize(&list);
        prop_assert!(is_canonical(&n), "not canonical: {:?}", n);
        prop_assert_eq!(mask(&n), mask(&list));
    }
}

// ---------------------------------------------------------------------------
// Property 2: normalize is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn normalize_is_idempotent(list in arb_list()) {
        let once = normalize(&list);
        prop_assert_eq!(normalize(&once), once);
    }
}

// ---------------------------------------------------------------------------
// Property 3: intersect_two matches minute-wise AND and is commutative
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn intersect_two_is_set_intersection(a in arb_list(), b in arb_list()) {
        let ab = intersect_two(&a, &b);
        let expected: Vec<bool> = mask(&a).iter().zip(mask(&b)).map(|(x, y)| *x && y).collect();

        prop_assert!(is_canonical(&ab), "not canonical: {:?}", ab);
        prop_assert_eq!(mask(&ab), expected);
        prop_assert_eq!(&ab, &intersect_two(&b, &a));
    }
}

// ---------------------------------------------------------------------------
// Property 4: intersect_all is independent of order and grouping
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn intersect_all_is_associative(a in arb_list(), b in arb_list(), c in arb_list()) {
        let abc = intersect_all(&[a.clone(), b.clone(), c.clone()]);
        let cab = intersect_all(&[c.clone(), a.clone(), b.clone()]);
        let grouped = intersect_two(&a, &intersect_two(&b, &c));

        prop_assert_eq!(&abc, &cab);
        prop_assert_eq!(&abc, &grouped);
    }
}

// ---------------------------------------------------------------------------
// Property 5: evenings-only clipping of an evening window is a no-op
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn evening_free_is_stable_under_evening_filter(evening in arb_evening()) {
        prop_assert_eq!(
            resolve_free_intervals(&DayOverride::EveningFree, evening, true),
            resolve_free_intervals(&DayOverride::EveningFree, evening, false)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: evenings-only never adds free time and never starts early
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn evening_filter_only_removes_time(ov in arb_override(), evening in arb_evening()) {
        let all = resolve_free_intervals(&ov, evening, false);
        let evenings = resolve_free_intervals(&ov, evening, true);

        prop_assert!(is_canonical(&all));
        prop_assert!(is_canonical(&evenings));
        prop_assert!(evenings.iter().all(|i| i.start >= evening));
        prop_assert_eq!(intersect_two(&evenings, &all), evenings);
    }
}

// ---------------------------------------------------------------------------
// Property 7: aggregate totals always equal the included-set size
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn month_totals_match_group_size(people in arb_people(), evenings_only in any::<bool>()) {
        let month: MonthKey = "2026-03".parse().unwrap();
        let agg = aggregate_month(&people, &month, evenings_only);

        prop_assert_eq!(agg.total, people.len());
        for day in agg.by_day.values() {
            prop_assert_eq!(day.total, people.len());
            prop_assert!(day.free_count <= day.total);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 8: the evenings-only filter never raises a day's free-count
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn evening_filter_never_raises_counts(people in arb_people()) {
        let month: MonthKey = "2026-03".parse().unwrap();
        let all = aggregate_month(&people, &month, false);
        let evenings = aggregate_month(&people, &month, true);

        for (day, agg) in &all.by_day {
            prop_assert!(evenings.day(day).free_count <= agg.free_count);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 9: buckets tile the day and shared time is free for everyone
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn buckets_and_overlap_are_consistent(
        people in arb_people(),
        width in 1u16..=240,
        day in 1u32..=5,
    ) {
        let day_key = format!("2026-03-{:02}", day);
        let buckets = compute_day_buckets(&people, &day_key, false, width).unwrap();

        prop_assert_eq!(buckets[0].start_mins, 0);
        prop_assert_eq!(buckets.last().unwrap().end_mins, 1440);
        for w in buckets.windows(2) {
            prop_assert_eq!(w[0].end_mins, w[1].start_mins);
        }

        let overlap = group_overlap(&people, &day_key, false);
        for bucket in &buckets {
            let mid = bucket.start_mins + width / 2;
            let shared = overlap.everyone.iter().any(|i| i.contains(mid));
            if shared {
                prop_assert_eq!(bucket.free_count, people.len());
            }
        }
    }
}
