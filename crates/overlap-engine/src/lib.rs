//! # overlap-engine
//!
//! Interval aggregation for group free-time planning.
//!
//! Several people each mark per-day availability for a month. This crate
//! turns those declarations into normalized free intervals and aggregates
//! them across the group. All times are naive minutes-of-day in `0..=1440`.
//!
//! ## Quick start
//!
//! ```rust
//! use overlap_engine::{group_overlap, DayOverride, PersonAvailabilityRecord, TimeRange};
//!
//! let ada = PersonAvailabilityRecord::new("ada", "Ada", 1050)
//!     .with_override("2026-03-14", DayOverride::ranges([TimeRange::new(540, 600)]));
//! let bob = PersonAvailabilityRecord::new("bob", "Bob", 1080)
//!     .with_override("2026-03-14", DayOverride::ranges([TimeRange::new(570, 660)]));
//!
//! let overlap = group_overlap(&[ada, bob], "2026-03-14", false);
//! let best = overlap.best_window().unwrap();
//! assert_eq!((best.start, best.end), (570, 600));
//! ```
//!
//! ## Modules
//!
//! - [`interval`]: normalize / intersect half-open minute ranges
//! - [`resolve`]: one person's day override → free intervals
//! - [`aggregate`]: month heatmap, day buckets, group overlap
//! - [`record`]: intervals, overrides, per-person records
//! - [`export`]: the portable v1 document (import/export boundary)
//! - [`store`]: one person's editable override map
//! - [`roster`]: imported people and the included set
//! - [`time`]: `HH:MM` helpers and calendar keys
//! - [`error`]: Error types

pub mod aggregate;
pub mod error;
pub mod export;
pub mod interval;
pub mod record;
pub mod resolve;
pub mod roster;
pub mod store;
pub mod time;

pub use aggregate::{
    aggregate_month, compute_day_buckets, group_overlap, Bucket, DayAggregate, GroupOverlap,
    MonthAggregate, Tint,
};
pub use error::OverlapError;
pub use export::{AvailabilityExport, MonthScope};
pub use interval::{intersect_all, intersect_two, normalize};
pub use record::{DayOverride, Interval, PersonAvailabilityRecord, TimeRange};
pub use resolve::{has_any_free_time, is_free_at_minute, resolve_free_intervals};
pub use roster::Roster;
pub use store::OverrideStore;
pub use time::{DayKey, MonthKey};
