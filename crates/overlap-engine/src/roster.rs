//! The set of imported people and which of them are included in aggregates.

use crate::export::AvailabilityExport;
use crate::record::PersonAvailabilityRecord;

#[derive(Debug, Clone)]
struct Entry {
    record: PersonAvailabilityRecord,
    included: bool,
}

/// Imported records in import order, keyed by person id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<Entry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A record with an id already present replaces the old
    /// one in place and keeps its inclusion flag; new people start included.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn import(&mut self, record: PersonAvailabilityRecord) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.record.id == record.id) {
            tracing::debug!(id = %record.id, "replacing previously imported person");
            entry.record = record;
            return true;
        }
        tracing::debug!(id = %record.id, "importing new person");
        self.entries.push(Entry {
            record,
            included: true,
        });
        false
    }

    /// Convenience for [`Roster::import`] on a validated document.
    pub fn import_export(&mut self, doc: AvailabilityExport) -> bool {
        self.import(doc.into_record())
    }

    /// Flip inclusion for `id`. Returns `false` if the id is unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.included = !entry.included;
                true
            }
            None => false,
        }
    }

    pub fn set_included(&mut self, id: &str, included: bool) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.included = included;
                true
            }
            None => false,
        }
    }

    pub fn is_included(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.record.id == id && e.included)
    }

    /// Drop a person entirely. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.record.id != id);
        self.entries.len() != before
    }

    /// Included records, in import order. This is the set aggregates run over.
    pub fn included(&self) -> Vec<&PersonAvailabilityRecord> {
        self.entries
            .iter()
            .filter(|e| e.included)
            .map(|e| &e.record)
            .collect()
    }

    /// Every imported record, included or not.
    pub fn all(&self) -> impl Iterator<Item = &PersonAvailabilityRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.record.id == id)
    }
}
