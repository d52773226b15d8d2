//! In-memory implementations of port traits
//!
//! `InMemoryTailorStore` implements both the search and the geography ports
//! over one shared table, so tests can sync and then search.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    CapabilityStatus, GeoPoint, ProximitySearch, SkillMatch, SortMode, TailorId, TailorMatch,
    TailorProfile,
};
use crate::domain::ports::{GeographyRepository, TailorSearchRepository};
use crate::error::DomainError;

/// Mean earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance in kilometers
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

// ============================================================================
// In-Memory Tailor Store
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryTailorStore {
    tailors: Arc<RwLock<HashMap<TailorId, TailorProfile>>>,
    capability: Arc<RwLock<Option<String>>>,
    searches: Arc<RwLock<Vec<ProximitySearch>>>,
}

impl InMemoryTailorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a tailor exactly as given
    pub fn with_tailor(self, tailor: TailorProfile) -> Self {
        self.tailors.write().unwrap().insert(tailor.id, tailor);
        self
    }

    /// Pre-populate with a tailor whose point is already derived
    pub fn with_synced_tailor(self, mut tailor: TailorProfile) -> Self {
        tailor.location_point = tailor
            .coordinates()
            .map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap());
        self.with_tailor(tailor)
    }

    /// Make the capability check report failure with this reason
    pub fn with_capability_failure(self, reason: &str) -> Self {
        *self.capability.write().unwrap() = Some(reason.to_string());
        self
    }

    pub fn get(&self, id: &TailorId) -> Option<TailorProfile> {
        self.tailors.read().unwrap().get(id).cloned()
    }

    pub fn search_calls(&self) -> usize {
        self.searches.read().unwrap().len()
    }

    pub fn last_search(&self) -> Option<ProximitySearch> {
        self.searches.read().unwrap().last().cloned()
    }
}

fn matches_skills(tailor: &TailorProfile, search: &ProximitySearch) -> bool {
    if search.skills.is_empty() {
        return true;
    }
    match search.skill_match {
        SkillMatch::Any => tailor.has_any_skill(&search.skills),
        SkillMatch::All => tailor.has_all_skills(&search.skills),
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl TailorSearchRepository for InMemoryTailorStore {
    async fn search(&self, search: &ProximitySearch) -> Result<Vec<TailorMatch>, DomainError> {
        self.searches.write().unwrap().push(search.clone());

        let tailors = self.tailors.read().unwrap();
        let mut matches: Vec<TailorMatch> = tailors
            .values()
            .filter(|t| matches_skills(t, search))
            .filter_map(|t| {
                let distance_km = search
                    .origin
                    .zip(t.location_point)
                    .map(|(origin, point)| haversine_km(&origin, &point));

                if let Some(radius_km) = search.radius_km {
                    match distance_km {
                        Some(d) if d <= radius_km => {}
                        _ => return None,
                    }
                }

                Some(TailorMatch {
                    tailor: t.clone(),
                    distance_km,
                    listed_at: (search.sort == SortMode::Recency).then_some(t.created_at),
                })
            })
            .collect();

        match search.sort {
            SortMode::Distance => matches.sort_by(|a, b| {
                compare_distance(a.distance_km, b.distance_km).then(a.tailor.id.cmp(&b.tailor.id))
            }),
            SortMode::Recency => matches.sort_by(|a, b| {
                b.tailor
                    .created_at
                    .cmp(&a.tailor.created_at)
                    .then(a.tailor.id.cmp(&b.tailor.id))
            }),
        }

        Ok(matches
            .into_iter()
            .skip(search.offset as usize)
            .take(search.limit as usize)
            .collect())
    }
}

#[async_trait]
impl GeographyRepository for InMemoryTailorStore {
    async fn ensure_spatial_capability(&self) -> CapabilityStatus {
        match self.capability.read().unwrap().clone() {
            Some(reason) => CapabilityStatus::Unconfirmed { reason },
            None => CapabilityStatus::Enabled,
        }
    }

    async fn backfill_location_points(&self) -> Result<u64, DomainError> {
        let mut tailors = self.tailors.write().unwrap();

        // Validate the whole batch first so a bad row leaves nothing half-done
        let mut derived = Vec::new();
        for tailor in tailors.values().filter(|t| t.needs_location_sync()) {
            let (lat, lon) = tailor.coordinates().unwrap_or_default();
            let point = GeoPoint::new(lat, lon)
                .map_err(|e| DomainError::Database(format!("tailor {}: {}", tailor.id, e)))?;
            derived.push((tailor.id, point));
        }

        for (id, point) in &derived {
            if let Some(tailor) = tailors.get_mut(id) {
                tailor.location_point = Some(*point);
            }
        }

        Ok(derived.len() as u64)
    }

    async fn set_coordinates(
        &self,
        id: &TailorId,
        coordinates: Option<GeoPoint>,
    ) -> Result<(), DomainError> {
        let mut tailors = self.tailors.write().unwrap();
        let tailor = tailors
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Tailor {} not found", id)))?;

        tailor.latitude = coordinates.map(|p| p.lat());
        tailor.longitude = coordinates.map(|p| p.lon());
        tailor.location_point = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_same_point() {
        let p = GeoPoint::new(12.97, 77.59).unwrap();
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        let d = haversine_km(&a, &b);
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }
}
