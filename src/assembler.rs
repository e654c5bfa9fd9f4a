//! Playlist assembly: expand a resolved album into tracks and append them.
//!
//! Each album goes out as one ordered batch, appended straight after it is
//! resolved. Batches from different albums are separate calls in request
//! order. Nothing is buffered locally.

use tracing::debug;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{CatalogMatch, PlaylistTarget};

/// Where appended tracks go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Resolve and count tracks, mutate nothing
    DryRun,
    Live(PlaylistTarget),
}

impl Destination {
    pub fn target(&self) -> Option<&PlaylistTarget> {
        match self {
            Destination::DryRun => None,
            Destination::Live(target) => Some(target),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, Destination::DryRun)
    }
}

pub struct PlaylistAssembler<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: Catalog + ?Sized> PlaylistAssembler<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Create the public destination playlist. Live runs only.
    pub fn create_target(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> Result<PlaylistTarget, CatalogError> {
        let target = self
            .catalog
            .create_playlist(owner_id, name, true, description)?;
        debug!(playlist_id = %target.id, "created playlist '{}'", name);
        Ok(target)
    }

    /// Fetch the album's tracks and, when live, append them as one batch.
    ///
    /// Returns the track count. Dry runs still list tracks so the count is
    /// real. An album with no tracks skips the append call.
    pub fn append_album(
        &self,
        destination: &Destination,
        matched: &CatalogMatch,
    ) -> Result<usize, CatalogError> {
        let uris: Vec<String> = self
            .catalog
            .list_album_tracks(&matched.catalog_id)?
            .into_iter()
            .map(|t| t.uri)
            .collect();

        if let Destination::Live(target) = destination {
            if !uris.is_empty() {
                self.catalog.append_tracks(&target.id, &uris)?;
                debug!(
                    playlist_id = %target.id,
                    album_id = %matched.catalog_id,
                    "appended {} tracks",
                    uris.len()
                );
            }
        }

        Ok(uris.len())
    }
}
