//! Request-list loading from JSON or CSV.
//!
//! The extension picks the format. Records missing `artist` or `album` are
//! set aside as [`RejectedRecord`]s; the rest of the file still loads.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::models::{parse_year, AlbumRequest};

/// A record that could not become an [`AlbumRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Zero-based position among the file's records (CSV: data rows, header excluded)
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadedRequests {
    pub requests: Vec<AlbumRequest>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            _ => bail!("Unsupported file format: '.{}' ({})", ext, path.display()),
        }
    }
}

pub fn load_requests(path: &Path) -> Result<LoadedRequests> {
    let format = InputFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request list {}", path.display()))?;

    let loaded = match format {
        InputFormat::Json => parse_json(&text),
        InputFormat::Csv => parse_csv(&text),
    }
    .with_context(|| format!("Failed to parse request list {}", path.display()))?;

    for r in &loaded.rejected {
        warn!("Skipping record {}: {}", r.index, r.reason);
    }
    Ok(loaded)
}

/// Parse a JSON array of request objects.
pub fn parse_json(text: &str) -> Result<LoadedRequests> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(text).context("Expected a JSON array of album objects")?;

    let mut loaded = LoadedRequests::default();
    for (index, value) in records.into_iter().enumerate() {
        match serde_json::from_value::<AlbumRequest>(value) {
            Ok(request) => match check_required(&request.artist, &request.album) {
                Ok(()) => loaded.requests.push(request),
                Err(reason) => loaded.rejected.push(RejectedRecord { index, reason }),
            },
            Err(e) => loaded.rejected.push(RejectedRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(loaded)
}

/// CSV row; every column optional so one bad row never fails the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    artist: Option<String>,
    album: Option<String>,
    date: Option<String>,
    year: Option<String>,
}

/// Parse a CSV table with a header row (`artist,album[,date][,year]`).
///
/// Header names are trimmed; values are kept as written, same as JSON.
pub fn parse_csv(text: &str) -> Result<LoadedRequests> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let mut loaded = LoadedRequests::default();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                loaded.rejected.push(RejectedRecord {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let artist = row.artist.unwrap_or_default();
        let album = row.album.unwrap_or_default();
        if let Err(reason) = check_required(&artist, &album) {
            loaded.rejected.push(RejectedRecord { index, reason });
            continue;
        }

        loaded.requests.push(AlbumRequest {
            artist,
            album,
            date: row.date.filter(|d| !d.is_empty()),
            year: row.year.as_deref().and_then(parse_year),
        });
    }
    Ok(loaded)
}

fn check_required(artist: &str, album: &str) -> std::result::Result<(), String> {
    match (artist.trim().is_empty(), album.trim().is_empty()) {
        (false, false) => Ok(()),
        (true, true) => Err("missing artist and album".to_string()),
        (true, false) => Err("missing artist".to_string()),
        (false, true) => Err("missing album".to_string()),
    }
}
