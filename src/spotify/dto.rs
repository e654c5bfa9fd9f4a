//! Spotify Web API response and request bodies.
//!
//! Only the fields the engine reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

use crate::models::{CandidateAlbum, TrackRef};

/// Generic paging object. Spotify occasionally returns `null` items.
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub albums: Option<Paging<SimplifiedAlbum>>,
}

#[derive(Debug, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SimplifiedTrack {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlaylistBody<'a> {
    pub name: &'a str,
    pub public: bool,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddTracksBody<'a> {
    pub uris: &'a [String],
}

/// `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: u16,
    pub message: String,
}

/// Accounts service token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// Accounts service OAuth error: `{"error": "invalid_grant", "error_description": "..."}`
#[derive(Debug, Deserialize)]
pub struct OAuthError {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

// ============================================================================
// Adapters
// ============================================================================

impl From<SimplifiedAlbum> for CandidateAlbum {
    /// The first credited artist is the one reported.
    fn from(album: SimplifiedAlbum) -> Self {
        let reported_artist = album
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();
        CandidateAlbum {
            id: album.id,
            reported_artist,
            reported_album: album.name,
        }
    }
}

impl From<SimplifiedTrack> for TrackRef {
    fn from(track: SimplifiedTrack) -> Self {
        TrackRef { uri: track.uri }
    }
}

impl SearchResponse {
    pub fn into_candidates(self) -> Vec<CandidateAlbum> {
        self.albums
            .map(|page| page.items.into_iter().flatten().map(Into::into).collect())
            .unwrap_or_default()
    }
}
