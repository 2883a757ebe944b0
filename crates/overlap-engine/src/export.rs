//! Portable availability document (schema version 1).
//!
//! This is the import/export boundary. Documents are validated here, so the
//! aggregation engine only ever sees well-typed records.
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "exportId": "2f0c...",
//!   "exportedAtIso": "2026-03-01T10:00:00+00:00",
//!   "month": "2026-03",
//!   "user": { "id": "u-1", "fullName": "Ada Lovelace" },
//!   "prefs": { "eveningStartMins": 1050 },
//!   "overridesByDay": {
//!     "2026-03-14": { "kind": "ranges", "ranges": [{ "startMins": 1080, "endMins": 1200 }] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OverlapError, Result};
use crate::record::{DayOverride, PersonAvailabilityRecord};
use crate::time::{DayKey, MonthKey, MINUTES_PER_DAY};

/// The only schema version this crate reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Which days a document covers: one month, or everything (backups).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthScope {
    Month(MonthKey),
    All,
}

impl MonthScope {
    /// Whether a raw day key falls inside this scope.
    pub fn covers(&self, day_key: &str) -> bool {
        match self {
            MonthScope::Month(month) => month.contains(day_key),
            MonthScope::All => true,
        }
    }
}

impl FromStr for MonthScope {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(MonthScope::All)
        } else {
            s.parse().map(MonthScope::Month)
        }
    }
}

impl fmt::Display for MonthScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthScope::Month(month) => write!(f, "{}", month),
            MonthScope::All => f.write_str("all"),
        }
    }
}

impl Serialize for MonthScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportUser {
    pub id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPrefs {
    pub evening_start_mins: u16,
}

/// One person's exported availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityExport {
    pub schema_version: u32,
    pub export_id: String,
    pub exported_at_iso: String,
    pub month: MonthScope,
    pub user: ExportUser,
    pub prefs: ExportPrefs,
    pub overrides_by_day: BTreeMap<String, DayOverride>,
}

impl AvailabilityExport {
    /// Build a document from one person's overrides.
    ///
    /// Only days inside `scope` are kept, and `None` overrides are dropped
    /// because absence already means busy.
    ///
    /// # Errors
    /// Returns [`OverlapError::InvalidRecord`] if the user id or name is blank.
    /// Any error [`AvailabilityExport::validate`] reports is returned too, so a
    /// built document always imports cleanly.
    pub fn build<'a>(
        user: ExportUser,
        evening_start: u16,
        overrides: impl IntoIterator<Item = (&'a String, &'a DayOverride)>,
        scope: MonthScope,
        export_id: impl Into<String>,
        exported_at: DateTime<Utc>,
    ) -> Result<Self> {
        if user.id.trim().is_empty() {
            return Err(OverlapError::InvalidRecord("user id is empty".to_string()));
        }
        if user.full_name.trim().is_empty() {
            return Err(OverlapError::InvalidRecord("full name is empty".to_string()));
        }
        let overrides_by_day: BTreeMap<String, DayOverride> = overrides
            .into_iter()
            .filter(|(day, ov)| scope.covers(day) && !ov.is_none())
            .map(|(day, ov)| (day.clone(), ov.clone()))
            .collect();

        let doc = Self {
            schema_version: SCHEMA_VERSION,
            export_id: export_id.into(),
            exported_at_iso: exported_at.to_rfc3339(),
            month: scope,
            user,
            prefs: ExportPrefs {
                evening_start_mins: evening_start,
            },
            overrides_by_day,
        };
        doc.validate()?;

        tracing::debug!(
            user = %doc.user.id,
            scope = %doc.month,
            days = doc.overrides_by_day.len(),
            "built availability export"
        );
        Ok(doc)
    }

    /// Parse and validate a document.
    ///
    /// # Errors
    /// - [`OverlapError::Json`] for malformed JSON or missing fields.
    /// - [`OverlapError::UnsupportedSchema`] for any version other than 1.
    /// - [`OverlapError::InvalidMonthKey`] for a bad `month` value.
    /// - [`OverlapError::InvalidRecord`] for a blank user id.
    /// - [`OverlapError::InvalidDayKey`] for a key that is not a calendar date.
    /// - [`OverlapError::MinuteOutOfRange`] for minutes above 1440.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: AvailabilityExport = serde_json::from_str(json)?;
        match doc.validate() {
            Ok(()) => {
                tracing::debug!(
                    user = %doc.user.id,
                    month = %doc.month,
                    days = doc.overrides_by_day.len(),
                    "accepted availability export"
                );
                Ok(doc)
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected availability export");
                Err(e)
            }
        }
    }

    /// Check the invariants that serde's typing alone does not enforce.
    ///
    /// Inverted or overlapping ranges are allowed here. The resolver drops
    /// or merges them.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(OverlapError::UnsupportedSchema(self.schema_version));
        }
        if self.user.id.trim().is_empty() {
            return Err(OverlapError::InvalidRecord("user id is empty".to_string()));
        }
        check_minute("prefs.eveningStartMins", self.prefs.evening_start_mins)?;

        for (day, ov) in &self.overrides_by_day {
            day.parse::<DayKey>()?;
            if let DayOverride::Ranges { ranges } = ov {
                for r in ranges {
                    check_minute(&format!("{}.startMins", day), r.start_mins)?;
                    check_minute(&format!("{}.endMins", day), r.end_mins)?;
                }
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `availability_<name>_<month>.json`, with whitespace runs in the name
    /// replaced by `_`.
    pub fn suggested_filename(&self) -> String {
        let safe_name = self.user.full_name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("availability_{}_{}.json", safe_name, self.month)
    }

    pub fn into_record(self) -> PersonAvailabilityRecord {
        PersonAvailabilityRecord {
            id: self.user.id,
            name: self.user.full_name,
            evening_start: self.prefs.evening_start_mins,
            overrides: self.overrides_by_day,
        }
    }
}

fn check_minute(field: &str, value: u16) -> Result<()> {
    if value > MINUTES_PER_DAY {
        return Err(OverlapError::MinuteOutOfRange {
            field: field.to_string(),
            value: u32::from(value),
        });
    }
    Ok(())
}
