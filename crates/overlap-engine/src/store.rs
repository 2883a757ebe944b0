//! A single person's editable override map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::DayOverride;
use crate::time::MonthKey;

/// Day key to override. Each day is replaced as a whole and never patched.
///
/// Storing [`DayOverride::None`] removes the key, so the map only holds days
/// that deviate from the busy default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideStore {
    overrides: BTreeMap<String, DayOverride>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The override for `day_key`. Absent days are `None` (busy).
    pub fn get(&self, day_key: &str) -> DayOverride {
        self.overrides.get(day_key).cloned().unwrap_or_default()
    }

    /// Replace the override for `day_key`.
    pub fn set(&mut self, day_key: impl Into<String>, ov: DayOverride) {
        let day_key = day_key.into();
        if ov.is_none() {
            self.overrides.remove(&day_key);
        } else {
            self.overrides.insert(day_key, ov);
        }
    }

    /// Remove the override for `day_key`. Returns whether one existed.
    pub fn clear(&mut self, day_key: &str) -> bool {
        self.overrides.remove(day_key).is_some()
    }

    pub fn clear_all(&mut self) {
        self.overrides.clear();
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DayOverride)> {
        self.overrides.iter()
    }

    /// Overrides whose day key falls inside `month`, in day order.
    pub fn in_month<'a>(
        &'a self,
        month: &'a MonthKey,
    ) -> impl Iterator<Item = (&'a String, &'a DayOverride)> + 'a {
        self.overrides.iter().filter(move |(day, _)| month.contains(day))
    }
}

impl<'a> IntoIterator for &'a OverrideStore {
    type Item = (&'a String, &'a DayOverride);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DayOverride>;

    fn into_iter(self) -> Self::IntoIter {
        self.overrides.iter()
    }
}
