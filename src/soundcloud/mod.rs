//! SoundCloud upstream integration.
//!
//! # Data Flow
//! ```text
//! search handler
//!     → client.rs (GET /search/tracks?q&limit&client_id)
//!     → types.rs (decode { collection: [...] })
//!     → transform.rs (UpstreamTrack → NormalizedTrack)
//!     → JSON array back to the handler
//! ```

pub mod client;
pub mod transform;
pub mod types;

pub use client::{SearchQuery, SoundCloudClient};
pub use transform::TrackNormalizer;
pub use types::{NormalizedTrack, SoundCloudError, SoundCloudResult, UpstreamTrack};
