//! PostgreSQL adapter for GeographyRepository
//!
//! Owns every write to `tailors.location_point`.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use super::map_db_err;
use crate::domain::entities::{CapabilityStatus, GeoPoint, TailorId, WGS84_SRID};
use crate::domain::ports::GeographyRepository;
use crate::error::DomainError;

const ENABLE_POSTGIS: &str = "CREATE EXTENSION IF NOT EXISTS postgis";

/// Derive the point for every row that has coordinates but no point yet.
/// ST_MakePoint is (x, y), so longitude goes first.
fn backfill_sql() -> String {
    format!(
        "UPDATE tailors \
         SET location_point = ST_SetSRID(ST_MakePoint(longitude, latitude), {})::geography \
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL AND location_point IS NULL",
        WGS84_SRID
    )
}

/// PostgreSQL implementation of GeographyRepository
pub struct PostgresGeographyRepository {
    db: DatabaseConnection,
}

impl PostgresGeographyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GeographyRepository for PostgresGeographyRepository {
    async fn ensure_spatial_capability(&self) -> CapabilityStatus {
        match self.db.execute_unprepared(ENABLE_POSTGIS).await {
            Ok(_) => CapabilityStatus::Enabled,
            Err(e) => CapabilityStatus::Unconfirmed {
                reason: e.to_string(),
            },
        }
    }

    async fn backfill_location_points(&self) -> Result<u64, DomainError> {
        // One statement, so the batch commits or fails as a whole
        let result = self
            .db
            .execute(Statement::from_string(DatabaseBackend::Postgres, backfill_sql()))
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected())
    }

    async fn set_coordinates(
        &self,
        id: &TailorId,
        coordinates: Option<GeoPoint>,
    ) -> Result<(), DomainError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "UPDATE tailors SET latitude = $1, longitude = $2, location_point = NULL WHERE id = $3",
            [
                coordinates.map(|p| p.lat()).into(),
                coordinates.map(|p| p.lon()).into(),
                id.0.into(),
            ],
        );

        let result = self.db.execute(stmt).await.map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            Err(DomainError::NotFound(format!("Tailor {} not found", id)))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backfill_builds_point_longitude_first() {
        let sql = backfill_sql();
        assert!(sql.contains("ST_MakePoint(longitude, latitude)"));
        assert!(sql.contains(", 4326)::geography"));
    }

    #[test]
    fn backfill_only_touches_unsynced_rows() {
        let sql = backfill_sql();
        assert!(sql.contains(
            "WHERE latitude IS NOT NULL AND longitude IS NOT NULL AND location_point IS NULL"
        ));
    }
}
