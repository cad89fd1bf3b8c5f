//! Widget configuration
//!
//! Configuration is read from `vocab-search.toml` (or an explicit path),
//! then overridden by `VOCAB_SEARCH_*` environment variables.

pub mod types;

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SearchBarError};
use crate::query::SearchScope;
use crate::records::LabelStrategy;

pub use types::{
    ScopeConfig, WidgetConfig, DEFAULT_INDEX, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_SEARCH_ENDPOINT,
};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "vocab-search.toml";

impl WidgetConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WidgetConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `vocab-search.toml` in `dir` when present,
    /// else defaults; environment overrides are applied last.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `VOCAB_SEARCH_ENDPOINT` and `VOCAB_SEARCH_TIMEOUT` overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("VOCAB_SEARCH_ENDPOINT") {
            if !url.is_empty() {
                self.search_endpoint = url;
            }
        }

        if let Ok(timeout) = std::env::var("VOCAB_SEARCH_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                self.request_timeout_seconds = seconds;
            }
        }
        self.request_timeout_seconds = self.request_timeout_seconds.clamp(1, 300);
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SearchBarError::invalid_value("page_size", self.page_size));
        }
        if self.index.trim().is_empty() {
            return Err(SearchBarError::invalid_value("index", "(empty)"));
        }
        if let LabelStrategy::Truncated { max_chars: 0 } = self.label_strategy {
            return Err(SearchBarError::invalid_value("label_strategy.max_chars", 0));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// The configured initial scope
    pub fn initial_scope(&self) -> SearchScope {
        SearchScope::new()
            .with_languages(self.scope.languages.as_deref())
            .with_datasets(self.scope.datasets.clone())
            .with_vocabularies(self.scope.vocabularies.clone())
            .with_tags(self.scope.tags.clone())
    }
}
