//! Search endpoint.
//!
//! # Responsibilities
//! - Read `q`, `limit` and `client_id` from the query string
//! - Resolve the credential (query → environment → configured fallback)
//! - Clamp the limit and forward one request upstream
//! - Normalize the result page
//!
//! # Design Decisions
//! - Only the upper bound of `limit` is enforced; negative values pass
//! - A limit that parses to zero is treated like garbage and replaced by
//!   the default

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    Json,
};

use crate::config::SoundCloudConfig;
use crate::http::request::RequestIdExt;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::soundcloud::{NormalizedTrack, SearchQuery};

/// Raw search parameters. The first occurrence of a repeated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub client_id: Option<String>,
}

impl SearchParams {
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "q" => &mut params.q,
                "limit" => &mut params.limit,
                "client_id" => &mut params.client_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Query parameter first, then the configured credential (which already
/// carries any environment override). Empty values never count.
pub fn resolve_client_id(from_query: Option<&str>, config: &SoundCloudConfig) -> Option<String> {
    from_query
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| config.client_id.clone().filter(|id| !id.is_empty()))
}

/// Clamp the requested limit to `max`, substituting `default` when the
/// value is missing, unparseable or zero.
pub fn clamp_limit(raw: Option<&str>, default: i64, max: i64) -> i64 {
    raw.and_then(parse_leading_int)
        .filter(|n| *n != 0)
        .unwrap_or(default)
        .min(max)
}

/// Lenient integer parse: leading whitespace and an optional sign are
/// accepted, a `0x` prefix switches to hex, and trailing garbage is
/// ignored (`"12abc"` → 12). Overflow saturates.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// `GET /api/soundcloud/search`
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<NormalizedTrack>>, ApiError> {
    let request_id = headers.request_id();
    let params = SearchParams::parse(query.as_deref().unwrap_or_default());
    let config = &state.config.soundcloud;

    let q = match params.q.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => q,
        None => {
            tracing::debug!(request_id = %request_id, "Search rejected: missing query");
            return Err(ApiError::MissingQuery);
        }
    };

    let client_id = match resolve_client_id(params.client_id.as_deref(), config) {
        Some(id) => id,
        None => {
            tracing::debug!(request_id = %request_id, "Search rejected: no client ID");
            return Err(ApiError::MissingClientId);
        }
    };

    let limit = clamp_limit(params.limit.as_deref(), config.default_limit, config.max_limit);
    let query = SearchQuery {
        q,
        limit,
        client_id: &client_id,
    };

    let tracks = match state.soundcloud.search_tracks(&query).await {
        Ok(tracks) => tracks,
        Err(e) => {
            let err = ApiError::from(e);
            if let ApiError::Upstream { status, .. } = &err {
                tracing::warn!(request_id = %request_id, status = %status, "Upstream rejected search");
            } else {
                tracing::error!(request_id = %request_id, error = ?err, "Search failed");
            }
            return Err(err);
        }
    };

    tracing::debug!(request_id = %request_id, count = tracks.len(), limit, "Search completed");
    Ok(Json(state.normalizer.normalize_all(tracks)))
}
