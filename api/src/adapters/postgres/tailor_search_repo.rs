//! PostgreSQL adapter for TailorSearchRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, FromQueryResult};
use uuid::Uuid;

use super::map_db_err;
use super::search_sql::build_search_statement;
use crate::domain::entities::{
    GeoPoint, ProximitySearch, Skill, SortMode, TailorId, TailorMatch, TailorProfile,
};
use crate::domain::ports::TailorSearchRepository;
use crate::error::DomainError;

/// One row of a proximity search
#[derive(Debug, FromQueryResult)]
struct TailorSearchRow {
    id: Uuid,
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    point_latitude: Option<f64>,
    point_longitude: Option<f64>,
    skills: Vec<String>,
    created_at: DateTimeWithTimeZone,
    distance_km: Option<f64>,
}

impl TailorSearchRow {
    fn into_match(self, sort: SortMode) -> TailorMatch {
        let skills = self
            .skills
            .iter()
            .filter_map(|tag| match tag.parse::<Skill>() {
                Ok(skill) => Some(skill),
                Err(e) => {
                    tracing::warn!("Ignoring stored skill on tailor {}: {}", self.id, e);
                    None
                }
            })
            .collect();

        let created_at = self.created_at.with_timezone(&Utc);
        let location_point = self
            .point_latitude
            .zip(self.point_longitude)
            .map(|(lat, lon)| GeoPoint::from_trusted(lat, lon));

        TailorMatch {
            tailor: TailorProfile {
                id: TailorId(self.id),
                name: self.name,
                latitude: self.latitude,
                longitude: self.longitude,
                location_point,
                skills,
                created_at,
            },
            distance_km: self.distance_km,
            listed_at: (sort == SortMode::Recency).then_some(created_at),
        }
    }
}

/// PostgreSQL implementation of TailorSearchRepository
pub struct PostgresTailorSearchRepository {
    db: DatabaseConnection,
}

impl PostgresTailorSearchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TailorSearchRepository for PostgresTailorSearchRepository {
    async fn search(&self, search: &ProximitySearch) -> Result<Vec<TailorMatch>, DomainError> {
        let stmt = build_search_statement(search);
        tracing::debug!("Tailor search SQL: {}", stmt.sql);

        let rows = TailorSearchRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_match(search.sort))
            .collect())
    }
}
