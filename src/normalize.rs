//! Query normalization for catalog album search.
//!
//! The structured (tier 1) query uses the raw request strings. Only the
//! free-text fallback (tier 2) goes through [`normalize`].

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Everything that is not an ASCII letter, ASCII digit or whitespace.
pub static NON_SEARCH_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Clean free text into a search-safe form.
///
/// Drops every character that is not an ASCII letter, ASCII digit or
/// whitespace, then lower-cases. Accented and non-Latin letters are dropped
/// rather than transliterated ("Sigur Rós" → "sigur rs"). Whitespace runs
/// are kept as they are.
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    NON_SEARCH_CHARS.replace_all(text, "").to_lowercase()
}

/// Field-qualified tier 1 query, built from the raw request strings.
pub fn structured_query(artist: &str, album: &str) -> String {
    format!("album:\"{}\" artist:\"{}\"", album, artist)
}

/// Free-text tier 2 query: artist and album joined by one space, then normalized.
pub fn fallback_query(artist: &str, album: &str) -> String {
    normalize(&format!("{} {}", artist, album))
}

// ============================================================================
// TESTS
// ============================================================================
