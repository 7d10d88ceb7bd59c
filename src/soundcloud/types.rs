//! Upstream and normalized track shapes, plus error definitions.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum SoundCloudError {
    /// Connection, TLS, or body transfer failed. The request URL is
    /// stripped: it carries the credential.
    #[error("{0}")]
    Http(reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("SoundCloud API error: {}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    /// Upstream body was not the expected JSON.
    #[error("Invalid JSON from SoundCloud API: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SoundCloudError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Result type for upstream operations.
pub type SoundCloudResult<T> = Result<T, SoundCloudError>;

/// Envelope returned by `/search/tracks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Missing and `null` both mean "no results".
    #[serde(default)]
    pub collection: Option<Vec<UpstreamTrack>>,
}

/// Track ids are numeric in practice, but some endpoints hand out URNs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(serde_json::Number),
    Text(String),
}

/// Uploader info embedded in a track.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamUser {
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub permalink: Option<String>,
}

/// Track as returned by the upstream search. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamTrack {
    pub id: Option<TrackId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub artwork_url: Option<String>,
    pub user: Option<UpstreamUser>,
    /// Duration in milliseconds. Kept as raw JSON: the upstream sometimes
    /// sends numbers as strings, and one odd track must not sink the page.
    pub duration: Option<serde_json::Value>,
    pub playback_count: Option<serde_json::Value>,
    pub created_at: Option<String>,
    pub permalink_url: Option<String>,
    pub permalink: Option<String>,
    pub stream_url: Option<String>,
}

/// Value of `source` on every normalized track.
pub const SOURCE: &str = "soundcloud";

/// The proxy's stable output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrack {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub duration: serde_json::Value,
    pub view_count: serde_json::Value,
    pub published_at: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,
}
