//! Upstream search client.
//!
//! # Responsibilities
//! - Build the `/search/tracks` request (query, limit, credential)
//! - Send the headers the upstream expects from a browser
//! - Separate non-2xx answers from transport and decode failures
//!
//! No retries and no timeout beyond reqwest's defaults. Dropping the returned
//! future aborts the in-flight request.

use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::SoundCloudConfig;
use crate::observability::metrics;
use crate::soundcloud::types::{SearchResponse, SoundCloudError, SoundCloudResult, UpstreamTrack};

/// Parameters for a single upstream search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub q: &'a str,
    pub limit: i64,
    pub client_id: &'a str,
}

/// Upstream API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SoundCloudClient {
    http: Client,
    search_url: String,
}

impl SoundCloudClient {
    /// Create a client from configuration.
    pub fn new(config: &SoundCloudConfig) -> SoundCloudResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            search_url: search_url(&config.api_base_url),
        })
    }

    /// Run one track search and return the raw result page.
    pub async fn search_tracks(&self, query: &SearchQuery<'_>) -> SoundCloudResult<Vec<UpstreamTrack>> {
        let limit = query.limit.to_string();

        tracing::debug!(url = %self.search_url, q = %query.q, limit = query.limit, "Querying SoundCloud");

        let response = self
            .http
            .get(&self.search_url)
            .header(ACCEPT, "application/json")
            .query(&[("q", query.q), ("limit", limit.as_str()), ("client_id", query.client_id)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        metrics::record_upstream(status.as_u16());

        if !status.is_success() {
            let body = response.text().await.map_err(transport_error)?;
            return Err(SoundCloudError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let page: SearchResponse = serde_json::from_slice(&bytes)?;
        Ok(page.collection.unwrap_or_default())
    }
}

/// Log the full error here; what leaves this module has no URL.
fn transport_error(err: reqwest::Error) -> SoundCloudError {
    tracing::error!(error = %err, "SoundCloud request failed");
    SoundCloudError::from(err)
}

fn search_url(api_base_url: &str) -> String {
    format!("{}/search/tracks", api_base_url.trim_end_matches('/'))
}
