//! Sequential resolve → audit → append → report run over a request list.
//!
//! Per request: `Pending → Resolving → (Found → Auditing → Added |
//! AddedWithDivergence) | NotFound`. One pass, no re-entry. The first
//! catalog fault stops the run; tracks already appended stay put.

use tracing::{info, warn};

use crate::assembler::{Destination, PlaylistAssembler};
use crate::audit::audit;
use crate::catalog::{Catalog, CatalogError};
use crate::models::{AlbumRequest, PlaylistTarget, ResolutionOutcome};
use crate::progress::RequestProgress;
use crate::report::{BatchReport, BatchReporter};
use crate::resolver::Resolver;

/// Which playlist a live run writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistChoice {
    Create { name: String, description: String },
    Existing { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    pub playlist: PlaylistChoice,
}

/// Run without progress display.
pub fn run<C: Catalog + ?Sized>(
    catalog: &C,
    requests: &[AlbumRequest],
    options: &RunOptions,
) -> Result<BatchReport, CatalogError> {
    run_with_progress(
        catalog,
        requests,
        options,
        &RequestProgress::hidden(requests.len()),
    )
}

pub fn run_with_progress<C: Catalog + ?Sized>(
    catalog: &C,
    requests: &[AlbumRequest],
    options: &RunOptions,
    progress: &RequestProgress,
) -> Result<BatchReport, CatalogError> {
    let resolver = Resolver::new(catalog);
    let assembler = PlaylistAssembler::new(catalog);

    let destination = open_destination(catalog, &assembler, options)?;
    let mut reporter = BatchReporter::new();

    for request in requests {
        progress.start(request);
        let outcome = process_request(&resolver, &assembler, &destination, request)?;

        if let ResolutionOutcome::NotFound = outcome {
            warn!("Album '{}' by '{}' not found", request.album, request.artist);
        }
        reporter.record(request, outcome);

        progress.advance();
    }

    progress.finish(reporter.len());
    Ok(reporter.summarize(destination.is_dry_run(), destination.target().cloned()))
}

fn open_destination<C: Catalog + ?Sized>(
    catalog: &C,
    assembler: &PlaylistAssembler<'_, C>,
    options: &RunOptions,
) -> Result<Destination, CatalogError> {
    if options.dry_run {
        return Ok(Destination::DryRun);
    }

    let target = match &options.playlist {
        PlaylistChoice::Create { name, description } => {
            let owner = catalog.current_user_id()?;
            let target = assembler.create_target(&owner, name, description)?;
            info!("Created playlist '{}' ({})", target.name, target.id);
            target
        }
        PlaylistChoice::Existing { id } => {
            info!("Appending to existing playlist {}", id);
            PlaylistTarget::existing(id.clone())
        }
    };

    Ok(Destination::Live(target))
}

/// Drive one request to a terminal state.
fn process_request<C: Catalog + ?Sized>(
    resolver: &Resolver<'_, C>,
    assembler: &PlaylistAssembler<'_, C>,
    destination: &Destination,
    request: &AlbumRequest,
) -> Result<ResolutionOutcome, CatalogError> {
    let Some(resolved) = resolver.resolve(request)? else {
        return Ok(ResolutionOutcome::NotFound);
    };

    let matched = resolved.matched;
    let divergent = audit(request, &matched);
    let track_count = assembler.append_album(destination, &matched)?;

    Ok(if divergent {
        ResolutionOutcome::AddedWithDivergence {
            resolved_artist: matched.resolved_artist,
            resolved_album: matched.resolved_album,
            track_count,
        }
    } else {
        ResolutionOutcome::Added { track_count }
    })
}
