//! Geography sync service
//!
//! Backfills `location_point` from raw coordinates and keeps the two in step
//! when coordinates change.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{CapabilityStatus, GeoPoint, SyncReport, TailorId};
use crate::domain::ports::GeographyRepository;
use crate::error::DomainError;

/// Service for maintaining derived geography points
pub struct GeographySyncService<GR>
where
    GR: GeographyRepository,
{
    geography: Arc<GR>,
    timeout: Duration,
}

impl<GR> GeographySyncService<GR>
where
    GR: GeographyRepository,
{
    pub fn new(geography: Arc<GR>, timeout: Duration) -> Self {
        Self { geography, timeout }
    }

    /// Run one synchronization pass.
    ///
    /// 1. Try to enable the spatial extension; failure only adds a warning.
    /// 2. Derive points for every tailor missing one.
    ///
    /// Safe to re-run: a second pass right after the first updates nothing.
    pub async fn synchronize(&self) -> Result<SyncReport, DomainError> {
        let mut report = SyncReport::default();

        let capability = match tokio::time::timeout(
            self.timeout,
            self.geography.ensure_spatial_capability(),
        )
        .await
        {
            Ok(status) => status,
            Err(_) => CapabilityStatus::Unconfirmed {
                reason: format!("no answer within {:?}", self.timeout),
            },
        };

        if let Some(warning) = capability.warning() {
            tracing::warn!("{}; continuing", warning);
            report.warnings.push(warning);
        }

        report.updated_count = self
            .bounded("location point backfill", self.geography.backfill_location_points())
            .await
            .inspect_err(|e| tracing::error!("Location point backfill failed: {}", e))?;

        tracing::info!(
            "Geography sync complete: {} tailor(s) updated, {} warning(s)",
            report.updated_count,
            report.warnings.len()
        );

        Ok(report)
    }

    /// Replace a tailor's raw coordinates.
    ///
    /// The derived point is cleared in the same write and re-derived by the
    /// next [`synchronize`](Self::synchronize), so it never disagrees with
    /// the raw columns.
    pub async fn set_coordinates(
        &self,
        id: &TailorId,
        coordinates: Option<GeoPoint>,
    ) -> Result<(), DomainError> {
        self.bounded(
            "coordinate update",
            self.geography.set_coordinates(id, coordinates),
        )
        .await?;

        tracing::debug!("Tailor {} coordinates set; location point invalidated", id);
        Ok(())
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                DomainError::Timeout(format!("{} exceeded {:?}", operation, self.timeout))
            })?
    }
}
