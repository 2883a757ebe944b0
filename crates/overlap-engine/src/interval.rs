//! Interval algebra over half-open minute ranges.
//!
//! A normalized list is sorted by start, and no two neighbours overlap or touch.
//! Every function here is pure and returns a fresh list.

use crate::record::Interval;

/// Put an arbitrary interval list into canonical form.
///
/// Degenerate entries (`end <= start`) are dropped. The rest are sorted by
/// start and any entry whose start is `<=` the running end is merged into it,
/// so touching intervals such as `[60,120)` and `[120,180)` become one.
pub fn normalize(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.iter().copied().filter(|i| i.end > i.start).collect();

    if sorted.is_empty() {
        return Vec::new();
    }

    sorted.sort_by_key(|i| i.start);

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for cur in sorted {
        if let Some(last) = merged.last_mut() {
            if cur.start <= last.end {
                last.end = last.end.max(cur.end);
                continue;
            }
        }
        merged.push(cur);
    }

    merged
}

/// Intersect two interval lists with a linear two-cursor sweep.
///
/// Both inputs are normalized first. At each step the overlap of the two
/// current intervals is emitted when non-empty, then the cursor whose interval
/// ends first advances (the second cursor on a tie).
pub fn intersect_two(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let a = normalize(a);
    let b = normalize(b);

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start.max(b[j].start);
        let end = a[i].end.min(b[j].end);
        if end > start {
            out.push(Interval::new(start, end));
        }

        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

/// Intersect any number of interval lists.
///
/// An empty group has no shared time, so `intersect_all(&[])` is empty rather
/// than the whole day. Once the running intersection is empty it stays empty,
/// so the fold stops early.
pub fn intersect_all<L: AsRef<[Interval]>>(lists: &[L]) -> Vec<Interval> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    let mut acc = normalize(first.as_ref());
    for next in rest {
        if acc.is_empty() {
            break;
        }
        acc = intersect_two(&acc, next.as_ref());
    }
    acc
}

/// Total number of minutes covered by a normalized list.
pub fn total_minutes(intervals: &[Interval]) -> u32 {
    intervals.iter().map(|i| u32::from(i.len())).sum()
}
