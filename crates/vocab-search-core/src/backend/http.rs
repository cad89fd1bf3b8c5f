//! HTTP backend over reqwest

use std::time::Duration;

use super::{gateway, Backend, ResourceDocument, SearchPage, SearchRequest};
use crate::config::WidgetConfig;
use crate::error::{Result, SearchBarError};
use crate::records::CandidateRecord;

/// Search and resource lookups against one backend host
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    host: String,
}

impl HttpBackend {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self> {
        let host = host.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vocab-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SearchBarError::Http {
                url: host.clone(),
                source,
            })?;

        // Fail early on hosts that can never produce a request URL
        gateway::endpoint_url(&host, &[])?;

        Ok(Self { client, host })
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        Self::new(config.search_endpoint.clone(), config.request_timeout())
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Backend for HttpBackend {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchPage<CandidateRecord>> {
        gateway::search(&self.client, &self.host, request, CandidateRecord::from_hit).await
    }

    async fn fetch_resource(
        &self,
        resource: &str,
        filters: &[(String, String)],
    ) -> Result<ResourceDocument> {
        gateway::fetch_resource(&self.client, &self.host, resource, filters).await
    }
}
