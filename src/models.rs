//! Core data models for album resolution and playlist assembly.
//!
//! Requests come in from the loader, catalog hits come back from the
//! [`Catalog`](crate::catalog::Catalog) collaborator, and outcomes flow
//! into the reporter.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// One requested release from the venue schedule.
///
/// `date` and `year` are informational. Only `artist` and `album` take
/// part in searching and auditing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRequest {
    pub artist: String,
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
}

impl AlbumRequest {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            date: None,
            year: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Schedules carry the year as either a number or a string ("2020").
#[derive(Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Parse a year field leniently; anything unparsable becomes `None`.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let field: Option<YearField> = Option::deserialize(deserializer)?;
    Ok(match field {
        Some(YearField::Number(n)) => i32::try_from(n).ok(),
        Some(YearField::Text(s)) => parse_year(&s),
        Some(YearField::Other(_)) | None => None,
    })
}

// ============================================================================
// Catalog Models
// ============================================================================

/// A single album hit as reported by the catalog search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateAlbum {
    pub id: String,
    pub reported_artist: String,
    pub reported_album: String,
}

/// The candidate chosen for a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogMatch {
    pub catalog_id: String,
    pub resolved_artist: String,
    pub resolved_album: String,
}

impl From<CandidateAlbum> for CatalogMatch {
    fn from(candidate: CandidateAlbum) -> Self {
        Self {
            catalog_id: candidate.id,
            resolved_artist: candidate.reported_artist,
            resolved_album: candidate.reported_album,
        }
    }
}

/// Opaque track identifier (a `spotify:track:...` URI for Spotify).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRef {
    pub uri: String,
}

impl TrackRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Destination playlist for a live run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistTarget {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl PlaylistTarget {
    /// Target for a playlist created outside this run; only the id is known.
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Terminal state of one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Added {
        track_count: usize,
    },
    NotFound,
    AddedWithDivergence {
        resolved_artist: String,
        resolved_album: String,
        track_count: usize,
    },
}

impl ResolutionOutcome {
    pub fn track_count(&self) -> usize {
        match self {
            ResolutionOutcome::Added { track_count }
            | ResolutionOutcome::AddedWithDivergence { track_count, .. } => *track_count,
            ResolutionOutcome::NotFound => 0,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, ResolutionOutcome::NotFound)
    }
}
