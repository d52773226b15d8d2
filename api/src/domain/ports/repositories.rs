//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL with PostGIS).

use async_trait::async_trait;

use crate::domain::entities::{CapabilityStatus, GeoPoint, ProximitySearch, TailorId, TailorMatch};
use crate::error::DomainError;

/// Read side of tailor discovery
///
/// Implementations must evaluate the distance predicate, the distance value
/// and the ordering inside the store, in a single round trip.
#[async_trait]
pub trait TailorSearchRepository: Send + Sync {
    /// Run a resolved search and return one page of matches in order
    async fn search(&self, search: &ProximitySearch) -> Result<Vec<TailorMatch>, DomainError>;
}

/// Write side of the derived location point
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeographyRepository: Send + Sync {
    /// Try to enable the spatial extension. Never fails: problems come back
    /// as [`CapabilityStatus::Unconfirmed`].
    async fn ensure_spatial_capability(&self) -> CapabilityStatus;

    /// Derive `location_point` for every tailor with both raw coordinates and
    /// no point yet. Atomic; returns the number of rows updated.
    async fn backfill_location_points(&self) -> Result<u64, DomainError>;

    /// Overwrite a tailor's raw coordinates and clear its derived point
    async fn set_coordinates(
        &self,
        id: &TailorId,
        coordinates: Option<GeoPoint>,
    ) -> Result<(), DomainError>;
}
