//! Search and resource-lookup backends
//!
//! [`Backend`] is the seam between the widget and the network. The
//! production implementation is [`http::HttpBackend`]; tests plug in
//! in-memory backends.

pub mod gateway;
pub mod http;

use serde::Deserialize;

use crate::error::Result;
use crate::pagination::PaginationMetadata;
use crate::query::FilterExpression;
use crate::records::{CandidateRecord, ResourceItem, SearchHit};

pub use gateway::{fetch_resource, search, search_url};
pub use http::HttpBackend;

/// Repeated `(key, value)` query parameters of a resource lookup
pub type ResourceFilters = Vec<(String, String)>;

/// Decoded search response body
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDocument {
    pub count: u64,
    #[serde(default)]
    pub data: Vec<SearchHit>,
}

/// Decoded resource lookup response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceDocument {
    #[serde(default)]
    pub data: Vec<ResourceItem>,
}

/// One search invocation
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub index: &'a str,
    pub page: u64,
    pub size: u64,
    /// Field name, optionally prefixed with `-` (descending) or `+`
    pub sort: Option<&'a str>,
    pub filter: &'a FilterExpression,
}

/// Count and navigation metadata of a search response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMeta {
    pub count: u64,
    pub pagination: PaginationMetadata,
}

/// A page of mapped search rows
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage<T> {
    pub content: Vec<T>,
    pub meta: SearchMeta,
}

/// Network operations the widget depends on.
///
/// Futures are awaited on a single-threaded executor, so implementations do
/// not need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Run a search and map every hit to a [`CandidateRecord`]
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchPage<CandidateRecord>>;

    /// Look up `resource` with the given filter parameters
    async fn fetch_resource(
        &self,
        resource: &str,
        filters: &[(String, String)],
    ) -> Result<ResourceDocument>;
}
