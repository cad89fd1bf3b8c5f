//! The selection set and its hydration from bare uris

pub mod hydrate;

use serde::Serialize;

use crate::records::{CandidateRecord, SelectionEntry};

pub use hydrate::{
    selection_filters, HydrationReport, Hydrator, DATASET_SCOPE_FILTER, VOCABULARY_SCOPE_FILTER,
};

/// Ordered selected entries; no two entries share a uri.
///
/// Every mutation goes through methods that keep uris unique, so a
/// `Selection` can never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection keeping the first entry of every uri
    pub fn from_entries(entries: impl IntoIterator<Item = SelectionEntry>) -> Self {
        let mut selection = Self::new();
        for entry in entries {
            selection.insert(entry);
        }
        selection
    }

    /// Append `entry` unless its uri is already selected
    pub fn insert(&mut self, entry: SelectionEntry) -> bool {
        if self.contains(entry.uri()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, uri: &str) -> Option<SelectionEntry> {
        let index = self.entries.iter().position(|e| e.uri() == uri)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.iter().any(|e| e.uri() == uri)
    }

    pub fn get(&self, uri: &str) -> Option<&SelectionEntry> {
        self.entries.iter().find(|e| e.uri() == uri)
    }

    pub fn uris(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.uri().to_string()).collect()
    }

    /// Keep only the first entry
    pub fn truncate_to_first(&mut self) {
        self.entries.truncate(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Selected records whose uri does not occur in `records`
    pub fn records_outside<'a>(
        &'a self,
        records: &'a [CandidateRecord],
    ) -> impl Iterator<Item = &'a CandidateRecord> + 'a {
        self.entries
            .iter()
            .map(|e| &e.record)
            .filter(move |selected| !records.iter().any(|r| r.uri == selected.uri))
    }
}
