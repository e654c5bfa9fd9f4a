//! Catalog collaborator interface.
//!
//! The resolver, assembler and pipeline only ever see a `&dyn Catalog` (or a
//! generic `C: Catalog`). The Spotify client implements it for real runs and
//! tests substitute a scripted mock.

use crate::models::{CandidateAlbum, PlaylistTarget, TrackRef};

/// Failures of the catalog service itself.
///
/// "No match" is never one of these; an empty search result is a normal
/// outcome. Any of these is fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Transport failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials rejected or missing
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// HTTP 429
    #[error("Rate limited by catalog service")]
    RateLimited,

    /// Non-success status with the service's own error message
    #[error("Catalog API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not decode
    #[error("Malformed catalog response: {0}")]
    Parse(String),
}

/// Operations the engine consumes from the catalog service.
pub trait Catalog {
    /// Album search. `structured` marks a field-qualified query.
    fn search_album(
        &self,
        query: &str,
        structured: bool,
        limit: usize,
    ) -> Result<Vec<CandidateAlbum>, CatalogError>;

    /// Every track of an album, in catalog order.
    fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>, CatalogError>;

    fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<PlaylistTarget, CatalogError>;

    /// Append `uris` to the end of the playlist, preserving their order.
    fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;

    fn current_user_id(&self) -> Result<String, CatalogError>;
}
