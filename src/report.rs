//! Per-request outcome collection and end-of-run reporting.
//!
//! Entries stay in request order. Every request renders as exactly one
//! outcome line; divergent matches add an indented note underneath.

use serde::Serialize;

use crate::models::{AlbumRequest, PlaylistTarget, ResolutionOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub request: AlbumRequest,
    pub outcome: ResolutionOutcome,
}

impl ReportEntry {
    /// The single outcome line for this request.
    pub fn line(&self, dry_run: bool) -> String {
        let req = &self.request;
        let (artist, album, track_count) = match &self.outcome {
            ResolutionOutcome::Added { track_count } => (&req.artist, &req.album, *track_count),
            ResolutionOutcome::AddedWithDivergence {
                resolved_artist,
                resolved_album,
                track_count,
            } => (resolved_artist, resolved_album, *track_count),
            ResolutionOutcome::NotFound => {
                return format!(
                    "WARNING: Album '{}' by '{}' not found in catalog",
                    req.album, req.artist
                );
            }
        };

        if dry_run {
            format!("Would add: '{}' by {} ({} tracks)", album, artist, track_count)
        } else {
            format!("Added album '{}' by {} ({} tracks)", album, artist, track_count)
        }
    }

    /// Review note for a divergent match.
    pub fn divergence_note(&self) -> Option<String> {
        match &self.outcome {
            ResolutionOutcome::AddedWithDivergence {
                resolved_artist,
                resolved_album,
                ..
            } => Some(format!(
                "  Note: Found slightly different version of album:\n  Searched for: '{}' by {}\n  Found: '{}' by {}",
                self.request.album, self.request.artist, resolved_album, resolved_artist
            )),
            _ => None,
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub dry_run: bool,
    pub playlist: Option<PlaylistTarget>,
    pub entries: Vec<ReportEntry>,
    pub added: usize,
    pub divergent: usize,
    pub not_found: usize,
    pub total_tracks: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn outcomes(&self) -> Vec<&ResolutionOutcome> {
        self.entries.iter().map(|e| &e.outcome).collect()
    }

    /// Outcome lines (plus divergence notes), in request order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            lines.push(entry.line(self.dry_run));
            if let Some(note) = entry.divergence_note() {
                lines.push(note);
            }
        }
        lines
    }

    pub fn summary_line(&self) -> String {
        let mode = if self.dry_run { "Dry run" } else { "Live run" };
        format!(
            "{}: {} requested, {} added ({} divergent), {} not found, {} tracks",
            mode,
            self.total(),
            self.added + self.divergent,
            self.divergent,
            self.not_found,
            self.total_tracks
        )
    }
}

#[derive(Debug, Default)]
pub struct BatchReporter {
    entries: Vec<ReportEntry>,
}

impl BatchReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, request: &AlbumRequest, outcome: ResolutionOutcome) {
        self.entries.push(ReportEntry {
            request: request.clone(),
            outcome,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summarize(self, dry_run: bool, playlist: Option<PlaylistTarget>) -> BatchReport {
        let mut added = 0;
        let mut divergent = 0;
        let mut not_found = 0;
        let mut total_tracks = 0;

        for entry in &self.entries {
            match &entry.outcome {
                ResolutionOutcome::Added { .. } => added += 1,
                ResolutionOutcome::AddedWithDivergence { .. } => divergent += 1,
                ResolutionOutcome::NotFound => not_found += 1,
            }
            total_tracks += entry.outcome.track_count();
        }

        BatchReport {
            dry_run,
            playlist,
            entries: self.entries,
            added,
            divergent,
            not_found,
            total_tracks,
        }
    }
}
