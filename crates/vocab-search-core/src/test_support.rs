//! In-memory backend for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use serde_json::json;

use crate::backend::{Backend, ResourceDocument, SearchMeta, SearchPage, SearchRequest};
use crate::error::{Result, SearchBarError};
use crate::pagination::PaginationMetadata;
use crate::query::FilterExpression;
use crate::records::{CandidateRecord, ResourceItem};
use crate::resolve::{ALIAS_FILTER, URI_FILTER};
use crate::selection::{DATASET_SCOPE_FILTER, VOCABULARY_SCOPE_FILTER};

#[derive(Debug, Clone)]
struct ScopeResource {
    uri: String,
    alias: Option<String>,
}

/// Backend serving canned search results and resources, counting calls
#[derive(Default)]
pub struct FakeBackend {
    search_results: RefCell<Vec<CandidateRecord>>,
    concepts: Vec<CandidateRecord>,
    vocabularies: Vec<ScopeResource>,
    datasets: Vec<ScopeResource>,
    failing: RefCell<HashSet<String>>,
    search_calls: Cell<usize>,
    searched_filters: RefCell<Vec<FilterExpression>>,
    fetches: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(mut self, uri: &str, alias: Option<&str>) -> Self {
        self.vocabularies.push(ScopeResource {
            uri: uri.to_string(),
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn with_dataset(mut self, uri: &str, alias: Option<&str>) -> Self {
        self.datasets.push(ScopeResource {
            uri: uri.to_string(),
            alias: alias.map(str::to_string),
        });
        self
    }

    /// A concept served by resource lookups
    pub fn with_concept(mut self, record: CandidateRecord) -> Self {
        self.concepts.push(record);
        self
    }

    pub fn with_search_results(self, results: Vec<CandidateRecord>) -> Self {
        self.set_search_results(results);
        self
    }

    /// Make every request for `resource` (or `"search"`) fail
    pub fn failing_resource(self, resource: &str) -> Self {
        self.failing.borrow_mut().insert(resource.to_string());
        self
    }

    /// Let requests for `resource` succeed again
    pub fn recover(&self, resource: &str) {
        self.failing.borrow_mut().remove(resource);
    }

    pub fn set_search_results(&self, results: Vec<CandidateRecord>) {
        *self.search_results.borrow_mut() = results;
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.get()
    }

    pub fn last_filter(&self) -> Option<FilterExpression> {
        self.searched_filters.borrow().last().cloned()
    }

    pub fn fetch_count(&self, resource: &str) -> usize {
        self.fetches
            .borrow()
            .iter()
            .filter(|(r, _)| r == resource)
            .count()
    }

    /// Filters of every lookup made against `resource`
    pub fn fetches_of(&self, resource: &str) -> Vec<Vec<(String, String)>> {
        self.fetches
            .borrow()
            .iter()
            .filter(|(r, _)| r == resource)
            .map(|(_, filters)| filters.clone())
            .collect()
    }

    fn failure(resource: &str) -> SearchBarError {
        SearchBarError::Status {
            url: format!("fake://{resource}"),
            status: 503,
        }
    }

    fn concept_item(record: &CandidateRecord) -> ResourceItem {
        let labels: Vec<_> = record
            .pref_label
            .iter()
            .flat_map(|(language, labels)| {
                labels
                    .iter()
                    .map(move |content| json!({"content": content, "language": language}))
            })
            .collect();
        ResourceItem {
            id: format!("id-{}", record.uri),
            attributes: json!({
                "uri": record.uri,
                "pref-label": labels,
                "tag-labels": record.tag_labels,
                "source-dataset": record.source_dataset,
                "vocabulary": record.vocabulary,
            }),
        }
    }

    fn lookup_concepts(&self, filters: &[(String, String)]) -> Vec<ResourceItem> {
        let uris = filter_values(filters, URI_FILTER);
        let datasets = filter_values(filters, DATASET_SCOPE_FILTER);
        let vocabularies = filter_values(filters, VOCABULARY_SCOPE_FILTER);
        let scoped = !datasets.is_empty() || !vocabularies.is_empty();

        self.concepts
            .iter()
            .filter(|c| uris.contains(&c.uri.as_str()))
            .filter(|c| {
                !scoped
                    || c.source_dataset
                        .as_deref()
                        .is_some_and(|d| datasets.contains(&d))
                    || c.vocabulary
                        .as_deref()
                        .is_some_and(|v| vocabularies.contains(&v))
            })
            .map(Self::concept_item)
            .collect()
    }

    fn lookup_scope(resources: &[ScopeResource], filters: &[(String, String)]) -> Vec<ResourceItem> {
        let Some((key, value)) = filters.first() else {
            return Vec::new();
        };
        resources
            .iter()
            .filter(|r| match key.as_str() {
                ALIAS_FILTER => r.alias.as_deref() == Some(value.as_str()),
                URI_FILTER => r.uri == *value,
                _ => false,
            })
            .map(|r| ResourceItem {
                id: format!("id-{}", r.uri),
                attributes: json!({"uri": r.uri, "alias": r.alias}),
            })
            .collect()
    }
}

impl Backend for FakeBackend {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchPage<CandidateRecord>> {
        self.search_calls.set(self.search_calls.get() + 1);
        self.searched_filters.borrow_mut().push(request.filter.clone());
        tokio::task::yield_now().await;

        if self.failing.borrow().contains("search") {
            return Err(Self::failure("search"));
        }

        let content = self.search_results.borrow().clone();
        let count = content.len() as u64;
        Ok(SearchPage {
            content,
            meta: SearchMeta {
                count,
                pagination: PaginationMetadata::compute(request.page, request.size, count),
            },
        })
    }

    async fn fetch_resource(
        &self,
        resource: &str,
        filters: &[(String, String)],
    ) -> Result<ResourceDocument> {
        self.fetches
            .borrow_mut()
            .push((resource.to_string(), filters.to_vec()));
        // let sibling lookups of a batch interleave
        tokio::task::yield_now().await;

        if self.failing.borrow().contains(resource) {
            return Err(Self::failure(resource));
        }

        let data = match resource {
            "vocabularies" => Self::lookup_scope(&self.vocabularies, filters),
            "datasets" => Self::lookup_scope(&self.datasets, filters),
            _ => self.lookup_concepts(filters),
        };
        Ok(ResourceDocument { data })
    }
}

fn filter_values<'a>(filters: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    filters
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// A concept record with one English label
pub fn concept(uri: &str, label: &str) -> CandidateRecord {
    CandidateRecord::new(uri).with_label("en", label)
}
