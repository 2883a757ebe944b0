//! Minute-of-day formatting and calendar keys.
//!
//! All times are naive minute-of-day values in `0..=1440` with no timezone.
//! Days are keyed by `YYYY-MM-DD` strings and months by `YYYY-MM` strings.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{OverlapError, Result};

/// Number of minutes in a day. Also the exclusive end of every interval.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Evening start used for new profiles (17:30).
pub const DEFAULT_EVENING_START: u16 = 17 * 60 + 30;

/// Format minutes as zero-padded `HH:MM`. `1440` renders as `24:00`.
pub fn format_hhmm(mins: u16) -> String {
    format!("{:02}:{:02}", mins / 60, mins % 60)
}

/// Parse a strict `HH:MM` string into minutes-of-day.
///
/// Hours must be 00-23 and minutes 00-59, except `24:00` which maps to
/// [`MINUTES_PER_DAY`] so it can close a range at midnight.
pub fn parse_hhmm(text: &str) -> Option<u16> {
    let s = text.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return None;
    }

    let hh: u16 = s[..2].parse().ok()?;
    let mm: u16 = s[3..].parse().ok()?;

    if hh == 24 && mm == 0 {
        return Some(MINUTES_PER_DAY);
    }
    if hh > 23 || mm > 59 {
        return None;
    }
    Some(hh * 60 + mm)
}

/// A validated calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The month this day belongs to.
    pub fn month(&self) -> MonthKey {
        MonthKey {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl FromStr for DayKey {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        let well_shaped = s.len() == 10
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_shaped {
            return Err(OverlapError::InvalidDayKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DayKey)
            .map_err(|_| OverlapError::InvalidDayKey(s.to_string()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A validated calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(OverlapError::InvalidMonthKey(format!(
                "{:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The `"YYYY-MM-"` prefix shared by every day key in this month.
    pub fn day_prefix(&self) -> String {
        format!("{}-", self)
    }

    /// Prefix match of a raw day key against this month.
    pub fn contains(&self, day_key: &str) -> bool {
        day_key.starts_with(&self.day_prefix())
    }

    /// Every day of the month in calendar order.
    pub fn days(&self) -> Vec<DayKey> {
        let Some(first) = NaiveDate::from_ymd_opt(self.year, self.month, 1) else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .map(DayKey::from_date)
            .collect()
    }
}

impl FromStr for MonthKey {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OverlapError::InvalidMonthKey(s.to_string());
        let well_shaped = s.len() == 7
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_shaped {
            return Err(invalid());
        }
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[5..].parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
