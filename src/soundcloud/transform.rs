//! Upstream track → normalized track.
//!
//! Upstream data is loosely typed: empty strings and numeric zeros count as
//! missing, and every output field except `streamUrl` and `permalinkUrl`
//! falls back to a default.

use chrono::{SecondsFormat, Utc};
use serde_json::{Number, Value};

use crate::soundcloud::types::{NormalizedTrack, TrackId, UpstreamTrack, SOURCE};

const UNTITLED: &str = "Untitled";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Maps upstream tracks onto the output schema.
#[derive(Debug, Clone)]
pub struct TrackNormalizer {
    site_base_url: String,
}

impl TrackNormalizer {
    /// `site_base_url` is used to rebuild permalinks the upstream leaves out.
    pub fn new(site_base_url: impl Into<String>) -> Self {
        Self {
            site_base_url: site_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Normalize a whole result page, preserving order.
    pub fn normalize_all(&self, tracks: Vec<UpstreamTrack>) -> Vec<NormalizedTrack> {
        tracks.into_iter().map(|t| self.normalize(t)).collect()
    }

    pub fn normalize(&self, track: UpstreamTrack) -> NormalizedTrack {
        let user = track.user.unwrap_or_default();
        let permalink_url = present(track.permalink_url);

        let built_permalink = match (present(user.permalink), present(track.permalink)) {
            (Some(user_slug), Some(track_slug)) => {
                Some(format!("{}/{}/{}", self.site_base_url, user_slug, track_slug))
            }
            _ => None,
        };

        NormalizedTrack {
            id: track
                .id
                .and_then(id_string)
                .or_else(|| permalink_url.clone())
                .unwrap_or_else(synthetic_id),
            title: present(track.title).unwrap_or_else(|| UNTITLED.to_string()),
            description: present(track.description).unwrap_or_default(),
            thumbnail: present(track.artwork_url)
                .or_else(|| present(user.avatar_url))
                .unwrap_or_default(),
            channel_title: present(user.username)
                .or_else(|| present(user.full_name))
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            duration: truthy(track.duration).unwrap_or_else(|| Value::from(0)),
            view_count: truthy(track.playback_count).unwrap_or_else(|| Value::from(0)),
            published_at: present(track.created_at).unwrap_or_else(now_iso8601),
            source: SOURCE.to_string(),
            stream_url: track.stream_url,
            permalink_url: permalink_url.or(built_permalink),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `null`, `false`, zero and `""` count as missing; anything else passes
/// through with its upstream type.
fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn id_string(id: TrackId) -> Option<String> {
    let s = match id {
        TrackId::Number(n) => number_string(&n),
        TrackId::Text(s) => s,
    };
    present(Some(s))
}

/// Integral floats render without a fractional part (`1.0` → `"1"`).
fn number_string(n: &Number) -> String {
    if n.is_f64() {
        if let Some(v) = n.as_f64() {
            if v.fract() == 0.0 && v.abs() < 1e15 {
                return format!("{}", v as i64);
            }
        }
    }
    n.to_string()
}

/// Not unique across concurrent requests; ids are never used as keys.
fn synthetic_id() -> String {
    format!("sc_{}_{}", Utc::now().timestamp_millis(), rand::random::<f64>())
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
