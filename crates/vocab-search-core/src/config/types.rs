//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::records::LabelStrategy;

/// Default search host
pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://127.0.0.1:80";

/// Default search index
pub const DEFAULT_INDEX: &str = "concepts";

/// Default number of candidates fetched per search
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Default timeout for backend requests
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the search and resource backends
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Search index queried for candidates
    #[serde(default = "default_index")]
    pub index: String,

    /// Rows requested per search
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Backend request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Keep at most one selected entry
    #[serde(default)]
    pub single_select: bool,

    /// How display labels of selected entries are derived
    #[serde(default)]
    pub label_strategy: LabelStrategy,

    /// Render backend highlight fragments in candidate rows
    #[serde(default = "default_true")]
    pub highlight_enabled: bool,

    /// Expose the latest unresolved reference to the rendering surface
    #[serde(default = "default_true")]
    pub show_error: bool,

    /// Log unresolved references
    #[serde(default = "default_true")]
    pub show_console_error: bool,

    /// Discard search completions older than the last applied one
    #[serde(default)]
    pub strict_ordering: bool,

    /// Initial scope
    #[serde(default)]
    pub scope: ScopeConfig,
}

/// Initial scope attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Comma-joined language codes (absent means every language)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,

    #[serde(default)]
    pub datasets: Vec<String>,

    #[serde(default)]
    pub vocabularies: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            search_endpoint: default_search_endpoint(),
            index: default_index(),
            page_size: default_page_size(),
            request_timeout_seconds: default_request_timeout(),
            single_select: false,
            label_strategy: LabelStrategy::default(),
            highlight_enabled: true,
            show_error: true,
            show_console_error: true,
            strict_ordering: false,
            scope: ScopeConfig::default(),
        }
    }
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}
