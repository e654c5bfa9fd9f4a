//! Divergence check between a request and the album the catalog returned.
//!
//! Exact, case-sensitive comparison with no fuzzy scoring. The flag only
//! changes how an outcome is reported, never whether the album is added.

use crate::models::{AlbumRequest, CatalogMatch};

/// True when the resolved artist or album text differs from the request.
pub fn audit(request: &AlbumRequest, matched: &CatalogMatch) -> bool {
    matched.resolved_artist != request.artist || matched.resolved_album != request.album
}
