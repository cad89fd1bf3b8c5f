//! Hydration: turning selected uris into full selection entries

use std::collections::HashSet;
use std::time::Instant;

use futures_util::future::join_all;
use tracing::debug;

use super::Selection;
use crate::backend::{Backend, ResourceFilters};
use crate::error::{Result, UnresolvedReference};
use crate::query::SearchScope;
use crate::records::{CandidateRecord, LabelStrategy, SelectionEntry};
use crate::resolve::URI_FILTER;
use crate::trace_time;

/// Filter key admitting concepts of one source dataset (OR-joined)
pub const DATASET_SCOPE_FILTER: &str = "filter[:or:][:exact:source-dataset]";
/// Filter key admitting concepts of one vocabulary (OR-joined)
pub const VOCABULARY_SCOPE_FILTER: &str = "filter[:or:][:exact:vocabulary]";

/// Lookup filters for one selected uri within `scope`
pub fn selection_filters(uri: &str, scope: &SearchScope) -> ResourceFilters {
    let mut filters = vec![(URI_FILTER.to_string(), uri.to_string())];
    filters.extend(
        scope
            .datasets
            .iter()
            .map(|d| (DATASET_SCOPE_FILTER.to_string(), d.clone())),
    );
    filters.extend(
        scope
            .vocabularies
            .iter()
            .map(|v| (VOCABULARY_SCOPE_FILTER.to_string(), v.clone())),
    );
    filters
}

/// Counts of what one hydration batch did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Uris already in the live selection
    pub already_selected: usize,
    /// Entries taken over from the previous selection
    pub reused: usize,
    /// Entries fetched from the backend
    pub fetched: usize,
    /// Uris not found within the scope
    pub unresolved: Vec<UnresolvedReference>,
}

enum Planned<'a> {
    Reuse(SelectionEntry),
    Fetch(&'a str),
}

/// Hydrates uri-only selections against a resource backend
pub struct Hydrator<'a, B> {
    pub backend: &'a B,
    /// Resource collection the concepts live in
    pub resource: &'a str,
    pub scope: &'a SearchScope,
    /// Snapshot of the selection taken before the batch began
    pub previous: &'a Selection,
    pub strategy: &'a LabelStrategy,
}

impl<B: Backend> Hydrator<'_, B> {
    /// Fetch the full record of one uri. `Ok(None)` when the uri is not
    /// found within the scope.
    pub async fn fetch_entry(&self, uri: &str) -> Result<Option<SelectionEntry>> {
        let filters = selection_filters(uri, self.scope);
        let document = self.backend.fetch_resource(self.resource, &filters).await?;
        match document.data.into_iter().next() {
            Some(item) => {
                let record = CandidateRecord::from_resource(item)?;
                Ok(Some(SelectionEntry::new(record, self.strategy)))
            }
            None => Ok(None),
        }
    }

    /// Hydrate every uri into `live`.
    ///
    /// Duplicate uris are handled once. Uris already in `live` are skipped,
    /// uris of the previous selection are reused without a request, the rest
    /// are fetched concurrently. `live` is only touched after every fetch has
    /// settled; on a transport failure it is left unchanged.
    pub async fn hydrate(&self, uris: &[String], live: &mut Selection) -> Result<HydrationReport> {
        let start = Instant::now();
        let mut report = HydrationReport::default();

        let mut seen = HashSet::new();
        let mut plans = Vec::new();
        for uri in uris {
            if !seen.insert(uri.as_str()) {
                continue;
            }
            if live.contains(uri) {
                report.already_selected += 1;
            } else if let Some(entry) = self.previous.get(uri) {
                plans.push(Planned::Reuse(entry.clone()));
            } else {
                plans.push(Planned::Fetch(uri));
            }
        }

        let fetches = plans.iter().filter_map(|plan| match plan {
            Planned::Fetch(uri) => Some(self.fetch_entry(uri)),
            Planned::Reuse(_) => None,
        });
        let mut fetched = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        for plan in plans {
            match plan {
                Planned::Reuse(entry) => {
                    live.insert(entry);
                    report.reused += 1;
                }
                Planned::Fetch(uri) => match fetched.next().flatten() {
                    Some(entry) => {
                        live.insert(entry);
                        report.fetched += 1;
                    }
                    None => report.unresolved.push(UnresolvedReference::selection(uri)),
                },
            }
        }

        debug!(
            requested = uris.len(),
            reused = report.reused,
            fetched = report.fetched,
            unresolved = report.unresolved.len(),
            "hydrate_selection"
        );
        trace_time!(start, "hydrate_selection");
        Ok(report)
    }
}
