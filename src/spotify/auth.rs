//! Access-token acquisition for the Spotify Web API.
//!
//! Either a pre-issued bearer token, or a refresh-token grant against the
//! accounts service using the app's client id and secret. Playlist writes
//! need a user token with `playlist-modify-public`, which client-credentials
//! tokens cannot carry.

use std::fmt;

use reqwest::blocking::Client;
use tracing::debug;

use super::dto;
use crate::catalog::CatalogError;

pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// App credentials plus a user's long-lived refresh token.
#[derive(Clone)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for RefreshCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub enum AuthMethod {
    AccessToken(String),
    Refresh(RefreshCredentials),
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            AuthMethod::Refresh(creds) => f.debug_tuple("Refresh").field(creds).finish(),
        }
    }
}

impl AuthMethod {
    /// Produce a bearer token, exchanging the refresh token if needed.
    pub fn access_token(&self, http: &Client, token_url: &str) -> Result<String, CatalogError> {
        match self {
            AuthMethod::AccessToken(token) => {
                if token.trim().is_empty() {
                    return Err(CatalogError::Auth("access token is empty".to_string()));
                }
                Ok(token.clone())
            }
            AuthMethod::Refresh(creds) => refresh_access_token(http, creds, token_url),
        }
    }
}

/// Exchange a refresh token for a fresh access token.
pub fn refresh_access_token(
    http: &Client,
    creds: &RefreshCredentials,
    token_url: &str,
) -> Result<String, CatalogError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", creds.refresh_token.as_str()),
    ];

    let response = http
        .post(token_url)
        .basic_auth(&creds.client_id, Some(&creds.client_secret))
        .form(&params)
        .send()
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<dto::OAuthError>()
            .map(|e| oauth_message(&e))
            .unwrap_or_else(|_| format!("token endpoint returned HTTP {}", status.as_u16()));
        return Err(CatalogError::Auth(message));
    }

    let token: dto::TokenResponse = response
        .json()
        .map_err(|e| CatalogError::Parse(e.to_string()))?;
    debug!("refreshed access token (expires in {}s)", token.expires_in);
    Ok(token.access_token)
}

fn oauth_message(err: &dto::OAuthError) -> String {
    match &err.error_description {
        Some(desc) => format!("{}: {}", err.error, desc),
        None => err.error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> RefreshCredentials {
        RefreshCredentials {
            client_id: "app-id".into(),
            client_secret: "s3cret".into(),
            refresh_token: "r3fresh".into(),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let shown = format!("{:?}", AuthMethod::Refresh(creds()));
        assert!(shown.contains("app-id"));
        assert!(!shown.contains("s3cret"));
        assert!(!shown.contains("r3fresh"));

        let shown = format!("{:?}", AuthMethod::AccessToken("BQD-token".into()));
        assert!(!shown.contains("BQD-token"));
    }

    #[test]
    fn test_access_token_passthrough() {
        let http = Client::new();
        let token = AuthMethod::AccessToken("BQD-token".into())
            .access_token(&http, TOKEN_URL)
            .unwrap();
        assert_eq!(token, "BQD-token");
    }

    #[test]
    fn test_empty_access_token_rejected() {
        let http = Client::new();
        let err = AuthMethod::AccessToken("  ".into())
            .access_token(&http, TOKEN_URL)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Auth(_)));
    }

    #[test]
    fn test_oauth_message() {
        let err: dto::OAuthError = serde_json::from_str(
            r#"{"error": "invalid_grant", "error_description": "Invalid refresh token"}"#,
        )
        .unwrap();
        assert_eq!(oauth_message(&err), "invalid_grant: Invalid refresh token");
    }
}
