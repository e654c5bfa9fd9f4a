//! Spotify Web API client
//!
//! Blocking client implementing [`Catalog`]. One request completes before the
//! next starts; there is no retry or backoff. A 429 surfaces as
//! [`CatalogError::RateLimited`] and ends the run.
//! See: https://developer.spotify.com/documentation/web-api

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::auth::{AuthMethod, TOKEN_URL};
use super::dto;
use crate::catalog::{Catalog, CatalogError};
use crate::models::{CandidateAlbum, PlaylistTarget, TrackRef};

pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Page size for album track listings (API maximum)
const TRACK_PAGE_SIZE: usize = 50;

/// Maximum URIs per add-items request (API limit)
pub const APPEND_CHUNK_SIZE: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("hifi-playlist/", env!("CARGO_PKG_VERSION"));

pub struct SpotifyClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Build the HTTP client and obtain an access token.
    pub fn connect(auth: &AuthMethod, base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = build_http_client()?;
        let access_token = auth.access_token(&http, TOKEN_URL)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    #[cfg(test)]
    fn with_token(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        Self::connect(&AuthMethod::AccessToken(access_token.into()), base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.access_token)
    }

    /// Send an authorized request; any transport failure is a network error.
    fn send(&self, builder: RequestBuilder) -> Result<Response, CatalogError> {
        self.authorized(builder)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))
    }

    /// Send a request and decode a successful JSON body.
    fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, CatalogError> {
        check_status(self.send(builder)?)?
            .json::<T>()
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

fn build_http_client() -> Result<Client, CatalogError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| CatalogError::Network(e.to_string()))
}

/// Map a non-success response onto the catalog error taxonomy.
fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<dto::ApiError>()
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
    Err(status_error(status, message))
}

pub fn status_error(status: StatusCode, message: String) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited,
        _ => CatalogError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

impl Catalog for SpotifyClient {
    fn search_album(
        &self,
        query: &str,
        structured: bool,
        limit: usize,
    ) -> Result<Vec<CandidateAlbum>, CatalogError> {
        debug!(structured, limit, "searching albums: {}", query);
        let limit = limit.to_string();
        let request = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", "album"), ("limit", limit.as_str())]);

        let response: dto::SearchResponse = self.send_json(request)?;
        Ok(response.into_candidates())
    }

    fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>, CatalogError> {
        let limit = TRACK_PAGE_SIZE.to_string();
        let first = self
            .http
            .get(self.url(&format!("/albums/{}/tracks", album_id)))
            .query(&[("limit", limit.as_str())]);

        let mut tracks = Vec::new();
        let mut page: dto::Paging<dto::SimplifiedTrack> = self.send_json(first)?;
        loop {
            tracks.extend(page.items.into_iter().flatten().map(TrackRef::from));
            match page.next {
                Some(next) => page = self.send_json(self.http.get(next))?,
                None => break,
            }
        }

        debug!(album_id, "listed {} tracks", tracks.len());
        Ok(tracks)
    }

    fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<PlaylistTarget, CatalogError> {
        let body = dto::CreatePlaylistBody {
            name,
            public,
            description,
        };
        let request = self
            .http
            .post(self.url(&format!("/users/{}/playlists", owner_id)))
            .json(&body);

        let created: dto::PlaylistResponse = self.send_json(request)?;
        Ok(PlaylistTarget {
            id: created.id,
            name: created.name,
            description: created
                .description
                .unwrap_or_else(|| description.to_string()),
        })
    }

    fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        for chunk in uris.chunks(APPEND_CHUNK_SIZE) {
            let request = self
                .http
                .post(&url)
                .json(&dto::AddTracksBody { uris: chunk });
            check_status(self.send(request)?)?;
        }
        Ok(())
    }

    fn current_user_id(&self) -> Result<String, CatalogError> {
        let profile: dto::UserProfile = self.send_json(self.http.get(self.url("/me")))?;
        Ok(profile.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_with_custom_url() {
        let client = SpotifyClient::with_token("token", "http://localhost:8080/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
        assert_eq!(client.url("/me"), "http://localhost:8080/v1/me");
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("hifi-playlist/"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "expired".into()),
            CatalogError::Auth("expired".into())
        );
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, "scope".into()),
            CatalogError::Auth("scope".into())
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "slow down".into()),
            CatalogError::RateLimited
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "upstream".into()),
            CatalogError::Api {
                status: 502,
                message: "upstream".into()
            }
        );
    }

    #[test]
    fn test_request_failure_is_network_error() {
        let client = SpotifyClient::with_token("token", DEFAULT_API_BASE).unwrap();
        // An unparsable URL fails inside reqwest before any socket is opened
        let err = client.send(client.http.get("not a url")).unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
