//! Tailor search service
//!
//! Resolves a caller's query and hands it to the store. All distance math,
//! filtering and ordering happen in the repository.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{SearchQuery, SortMode, TailorMatch};
use crate::domain::ports::TailorSearchRepository;
use crate::error::{AppError, DomainError};

/// Service for proximity search over tailors
pub struct TailorSearchService<TR>
where
    TR: TailorSearchRepository,
{
    tailors: Arc<TR>,
    timeout: Duration,
}

impl<TR> TailorSearchService<TR>
where
    TR: TailorSearchRepository,
{
    pub fn new(tailors: Arc<TR>, timeout: Duration) -> Self {
        Self { tailors, timeout }
    }

    /// Search tailors.
    ///
    /// An unknown locality zone yields an empty list. Without a reference
    /// point, distance sorting falls back to most-recent-first.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<TailorMatch>, AppError> {
        let Some(search) = query.resolve() else {
            tracing::debug!("Unknown locality zone in {:?}; no matches", query.reference);
            return Ok(Vec::new());
        };

        if search.sort != query.sort_by {
            tracing::debug!(
                "No reference point; sorting by {} instead of {}",
                search.sort,
                query.sort_by
            );
        }

        let matches = tokio::time::timeout(self.timeout, self.tailors.search(&search))
            .await
            .map_err(|_| {
                DomainError::Timeout(format!("tailor search exceeded {:?}", self.timeout))
            })??;

        tracing::debug!(
            "Tailor search returned {} match(es) sorted by {}",
            matches.len(),
            search.sort
        );

        Ok(matches)
    }

    /// Sort mode the service will actually apply to `query`
    pub fn effective_sort(query: &SearchQuery) -> SortMode {
        query.resolve().map(|s| s.sort).unwrap_or(query.sort_by)
    }
}
