//! Scripted in-memory catalog for tests.
//!
//! Search results are keyed by exact query string; unknown queries return
//! no candidates and unknown albums have no tracks. Every call is recorded
//! so tests can assert on call counts and append order.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{CandidateAlbum, PlaylistTarget, TrackRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search {
        query: String,
        structured: bool,
        limit: usize,
    },
    ListTracks(String),
    CreatePlaylist {
        owner_id: String,
        name: String,
        public: bool,
        description: String,
    },
    Append {
        playlist_id: String,
        uris: Vec<String>,
    },
    CurrentUser,
}

pub struct MockCatalog {
    searches: HashMap<String, Vec<CandidateAlbum>>,
    tracks: HashMap<String, Vec<TrackRef>>,
    failing_queries: HashMap<String, CatalogError>,
    user_id: String,
    calls: RefCell<Vec<Call>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            tracks: HashMap::new(),
            failing_queries: HashMap::new(),
            user_id: "venue-owner".to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script `query` to return a single candidate.
    pub fn with_album(self, query: &str, id: &str, artist: &str, album: &str) -> Self {
        self.with_candidates(
            query,
            vec![CandidateAlbum {
                id: id.to_string(),
                reported_artist: artist.to_string(),
                reported_album: album.to_string(),
            }],
        )
    }

    pub fn with_candidates(mut self, query: &str, candidates: Vec<CandidateAlbum>) -> Self {
        self.searches.insert(query.to_string(), candidates);
        self
    }

    pub fn with_tracks(mut self, album_id: &str, uris: &[&str]) -> Self {
        self.tracks.insert(
            album_id.to_string(),
            uris.iter().map(|u| TrackRef::new(*u)).collect(),
        );
        self
    }

    pub fn failing_search(mut self, query: &str, error: CatalogError) -> Self {
        self.failing_queries.insert(query.to_string(), error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Search { query, .. } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn track_listings(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::ListTracks(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Append batches in call order.
    pub fn append_batches(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Append { uris, .. } => Some(uris.clone()),
                _ => None,
            })
            .collect()
    }

    /// Everything appended, flattened in call order.
    pub fn appended(&self) -> Vec<String> {
        self.append_batches().into_iter().flatten().collect()
    }

    pub fn playlists_created(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::CreatePlaylist { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for MockCatalog {
    fn search_album(
        &self,
        query: &str,
        structured: bool,
        limit: usize,
    ) -> Result<Vec<CandidateAlbum>, CatalogError> {
        self.record(Call::Search {
            query: query.to_string(),
            structured,
            limit,
        });
        if let Some(err) = self.failing_queries.get(query) {
            return Err(err.clone());
        }
        let mut found = self.searches.get(query).cloned().unwrap_or_default();
        found.truncate(limit);
        Ok(found)
    }

    fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>, CatalogError> {
        self.record(Call::ListTracks(album_id.to_string()));
        Ok(self.tracks.get(album_id).cloned().unwrap_or_default())
    }

    fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<PlaylistTarget, CatalogError> {
        self.record(Call::CreatePlaylist {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            public,
            description: description.to_string(),
        });
        Ok(PlaylistTarget {
            id: "playlist-1".to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.record(Call::Append {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        Ok(())
    }

    fn current_user_id(&self) -> Result<String, CatalogError> {
        self.record(Call::CurrentUser);
        Ok(self.user_id.clone())
    }
}
