//! Two-tier album resolution against the catalog.
//!
//! Strategies are tried in list order and the first one that yields a
//! candidate wins. Later strategies are never issued after a hit, and a hit
//! is never second-guessed; divergent hits are the auditor's concern.

use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogError};
use crate::models::{AlbumRequest, CatalogMatch};
use crate::normalize::{fallback_query, structured_query};

/// Candidates requested per search. Only the first is ever used.
pub const CANDIDATE_LIMIT: usize = 1;

/// One way of turning a request into an album search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Tier 1: `album:"<album>" artist:"<artist>"` with the raw strings
    Structured,
    /// Tier 2: normalized "<artist> <album>" free text
    Normalized,
}

impl SearchStrategy {
    pub fn query(self, request: &AlbumRequest) -> String {
        match self {
            SearchStrategy::Structured => structured_query(&request.artist, &request.album),
            SearchStrategy::Normalized => fallback_query(&request.artist, &request.album),
        }
    }

    pub fn is_structured(self) -> bool {
        matches!(self, SearchStrategy::Structured)
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchStrategy::Structured => "structured",
            SearchStrategy::Normalized => "normalized",
        }
    }
}

/// Default tier order: precise first, recall second.
pub const DEFAULT_STRATEGIES: [SearchStrategy; 2] =
    [SearchStrategy::Structured, SearchStrategy::Normalized];

/// A found album together with the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch {
    pub matched: CatalogMatch,
    pub strategy: SearchStrategy,
}

pub struct Resolver<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    strategies: Vec<SearchStrategy>,
}

impl<'a, C: Catalog + ?Sized> Resolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self::with_strategies(catalog, DEFAULT_STRATEGIES.to_vec())
    }

    pub fn with_strategies(catalog: &'a C, strategies: Vec<SearchStrategy>) -> Self {
        Self {
            catalog,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[SearchStrategy] {
        &self.strategies
    }

    /// Resolve one request. `Ok(None)` means not found at any tier.
    pub fn resolve(&self, request: &AlbumRequest) -> Result<Option<ResolvedMatch>, CatalogError> {
        for (tier, &strategy) in self.strategies.iter().enumerate() {
            let query = strategy.query(request);
            if tier > 0 {
                info!(
                    "Initial search failed for '{}' by {}. Trying {} search: '{}'",
                    request.album,
                    request.artist,
                    strategy.label(),
                    query
                );
            }

            let candidates =
                self.catalog
                    .search_album(&query, strategy.is_structured(), CANDIDATE_LIMIT)?;

            if let Some(first) = candidates.into_iter().next() {
                debug!(strategy = strategy.label(), album_id = %first.id, "album resolved");
                return Ok(Some(ResolvedMatch {
                    matched: first.into(),
                    strategy,
                }));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateAlbum;
    use crate::test_utils::{Call, MockCatalog};

    const KIND_OF_BLUE_Q: &str = "album:\"Kind of Blue\" artist:\"Miles Davis\"";

    #[test]
    fn test_tier_one_hit_never_issues_fallback() {
        let catalog =
            MockCatalog::new().with_album(KIND_OF_BLUE_Q, "X", "Miles Davis", "Kind of Blue");
        let resolver = Resolver::new(&catalog);

        let resolved = resolver
            .resolve(&AlbumRequest::new("Miles Davis", "Kind of Blue"))
            .unwrap()
            .unwrap();

        assert_eq!(resolved.strategy, SearchStrategy::Structured);
        assert_eq!(resolved.matched.catalog_id, "X");
        assert_eq!(
            catalog.calls(),
            vec![Call::Search {
                query: KIND_OF_BLUE_Q.to_string(),
                structured: true,
                limit: 1,
            }]
        );
    }

    #[test]
    fn test_fallback_used_when_tier_one_empty() {
        let catalog = MockCatalog::new().with_album("d voodoo", "Y", "D'Angelo", "Voodoo");
        let resolver = Resolver::new(&catalog);

        let resolved = resolver
            .resolve(&AlbumRequest::new("D", "Voodoo"))
            .unwrap()
            .unwrap();

        assert_eq!(resolved.strategy, SearchStrategy::Normalized);
        assert_eq!(resolved.matched.catalog_id, "Y");
        assert_eq!(resolved.matched.resolved_artist, "D'Angelo");
        assert_eq!(
            catalog.calls(),
            vec![
                Call::Search {
                    query: "album:\"Voodoo\" artist:\"D\"".to_string(),
                    structured: true,
                    limit: 1,
                },
                Call::Search {
                    query: "d voodoo".to_string(),
                    structured: false,
                    limit: 1,
                },
            ]
        );
    }

    #[test]
    fn test_takes_first_candidate_of_winning_tier() {
        let catalog = MockCatalog::new().with_candidates(
            "d voodoo",
            vec![
                CandidateAlbum {
                    id: "first".into(),
                    reported_artist: "D'Angelo".into(),
                    reported_album: "Voodoo".into(),
                },
                CandidateAlbum {
                    id: "second".into(),
                    reported_artist: "D".into(),
                    reported_album: "Voodoo".into(),
                },
            ],
        );
        let resolved = Resolver::new(&catalog)
            .resolve(&AlbumRequest::new("D", "Voodoo"))
            .unwrap()
            .unwrap();
        assert_eq!(resolved.matched.catalog_id, "first");
    }

    #[test]
    fn test_not_found_when_both_tiers_empty() {
        let catalog = MockCatalog::new();
        let resolved = Resolver::new(&catalog)
            .resolve(&AlbumRequest::new("Nobody", "Nothing"))
            .unwrap();

        assert!(resolved.is_none());
        assert_eq!(catalog.search_queries().len(), 2);
        assert!(catalog.track_listings().is_empty());
    }

    #[test]
    fn test_catalog_fault_propagates() {
        let catalog = MockCatalog::new().failing_search(
            "album:\"Lucid\" artist:\"Raveena\"",
            CatalogError::Network("connection reset".into()),
        );
        let err = Resolver::new(&catalog)
            .resolve(&AlbumRequest::new("Raveena", "Lucid"))
            .unwrap_err();

        assert_eq!(err, CatalogError::Network("connection reset".into()));
        // No fallback after a fault
        assert_eq!(catalog.search_queries().len(), 1);
    }

    #[test]
    fn test_single_strategy_list() {
        let catalog = MockCatalog::new().with_album("d voodoo", "Y", "D'Angelo", "Voodoo");
        let resolver = Resolver::with_strategies(&catalog, vec![SearchStrategy::Structured]);

        assert!(resolver
            .resolve(&AlbumRequest::new("D", "Voodoo"))
            .unwrap()
            .is_none());
        assert_eq!(resolver.strategies(), &[SearchStrategy::Structured]);
    }
}
