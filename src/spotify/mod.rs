//! Spotify Web API catalog.

pub mod auth;
pub mod client;
pub mod dto;

pub use auth::{AuthMethod, RefreshCredentials};
pub use client::{SpotifyClient, DEFAULT_API_BASE};
