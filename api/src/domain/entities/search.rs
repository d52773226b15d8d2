//! Proximity search value objects
//!
//! `SearchQuery` is what a caller asks for. `ProximitySearch` is the resolved
//! form handed to the store: zone names turned into points, the sort mode
//! degraded when there is nothing to measure distance from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::locality::LocalityZone;
use super::tailor::{Skill, TailorProfile};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Where distances are measured from
#[derive(Debug, Clone, PartialEq)]
pub enum SearchReference {
    /// Raw coordinates supplied by the caller
    Point(GeoPoint),
    /// A locality zone name, resolved through [`LocalityZone::lookup`]
    Zone(String),
}

/// Requested ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Nearest first
    Distance,
    /// Most recently created first
    Recency,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Distance => write!(f, "distance"),
            SortMode::Recency => write!(f, "recency"),
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(SortMode::Distance),
            "recency" => Ok(SortMode::Recency),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}

/// How a requested skill set is matched against a tailor's skills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillMatch {
    /// The tailor has at least one of the requested skills
    #[default]
    Any,
    /// The tailor has every requested skill
    All,
}

impl std::fmt::Display for SkillMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillMatch::Any => write!(f, "any"),
            SkillMatch::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for SkillMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(SkillMatch::Any),
            "all" => Ok(SkillMatch::All),
            _ => Err(format!("Unknown skill match mode: {}", s)),
        }
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub reference: Option<SearchReference>,
    /// Maximum distance in kilometers; only meaningful with a reference
    pub radius_km: Option<f64>,
    /// Required skills; empty means no skill filter
    pub skills: Vec<Skill>,
    pub skill_match: SkillMatch,
    pub sort_by: SortMode,
    pub limit: u64,
    pub offset: u64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            reference: None,
            radius_km: None,
            skills: Vec::new(),
            skill_match: SkillMatch::Any,
            sort_by: SortMode::Recency,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl SearchQuery {
    /// Resolve the reference and settle the effective sort mode.
    ///
    /// Returns `None` when the reference names an unknown zone: such a query
    /// can match nothing. Without a reference point distance sorting falls
    /// back to recency and any radius is dropped.
    pub fn resolve(&self) -> Option<ProximitySearch> {
        let origin = match &self.reference {
            Some(SearchReference::Point(point)) => Some(*point),
            Some(SearchReference::Zone(name)) => Some(LocalityZone::lookup(name)?.reference_point()),
            None => None,
        };

        let sort = match (self.sort_by, origin) {
            (SortMode::Distance, None) => SortMode::Recency,
            (mode, _) => mode,
        };

        let mut skills = self.skills.clone();
        skills.sort();
        skills.dedup();

        Some(ProximitySearch {
            origin,
            radius_km: origin.and(self.radius_km),
            skills,
            skill_match: self.skill_match,
            sort,
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset,
        })
    }
}

/// A search ready to run against the store
#[derive(Debug, Clone, PartialEq)]
pub struct ProximitySearch {
    pub origin: Option<GeoPoint>,
    pub radius_km: Option<f64>,
    pub skills: Vec<Skill>,
    pub skill_match: SkillMatch,
    /// Effective ordering; never `Distance` without an origin
    pub sort: SortMode,
    pub limit: u64,
    pub offset: u64,
}

impl ProximitySearch {
    pub fn radius_meters(&self) -> Option<f64> {
        self.radius_km.map(|km| km * 1000.0)
    }
}

/// One search hit
#[derive(Debug, Clone, Serialize)]
pub struct TailorMatch {
    pub tailor: TailorProfile,
    /// Great-circle distance from the reference point, when there was one
    /// and the tailor has a location point
    pub distance_km: Option<f64>,
    /// Creation time, present when results are ranked by recency
    pub listed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bengaluru() -> GeoPoint {
        GeoPoint::new(12.97, 77.59).unwrap()
    }

    #[test]
    fn sort_mode_from_str() {
        assert_eq!("distance".parse::<SortMode>().unwrap(), SortMode::Distance);
        assert_eq!("Recency".parse::<SortMode>().unwrap(), SortMode::Recency);
        assert!("rating".parse::<SortMode>().is_err());
    }

    #[test]
    fn skill_match_defaults_to_any() {
        assert_eq!(SkillMatch::default(), SkillMatch::Any);
        assert_eq!("ALL".parse::<SkillMatch>().unwrap(), SkillMatch::All);
    }

    #[test]
    fn resolve_point_keeps_distance_sort_and_radius() {
        let query = SearchQuery {
            reference: Some(SearchReference::Point(bengaluru())),
            radius_km: Some(2.5),
            sort_by: SortMode::Distance,
            ..Default::default()
        };

        let search = query.resolve().unwrap();

        assert_eq!(search.origin, Some(bengaluru()));
        assert_eq!(search.sort, SortMode::Distance);
        assert_eq!(search.radius_meters(), Some(2500.0));
    }

    #[test]
    fn resolve_zone_uses_zone_reference_point() {
        let query = SearchQuery {
            reference: Some(SearchReference::Zone("Koramangala".to_string())),
            ..Default::default()
        };

        let search = query.resolve().unwrap();

        assert_eq!(
            search.origin,
            Some(LocalityZone::Koramangala.reference_point())
        );
    }

    #[test]
    fn resolve_unknown_zone_matches_nothing() {
        let query = SearchQuery {
            reference: Some(SearchReference::Zone("narnia".to_string())),
            ..Default::default()
        };

        assert!(query.resolve().is_none());
    }

    #[test]
    fn resolve_without_reference_degrades_distance_to_recency() {
        let query = SearchQuery {
            sort_by: SortMode::Distance,
            radius_km: Some(5.0),
            ..Default::default()
        };

        let search = query.resolve().unwrap();

        assert_eq!(search.sort, SortMode::Recency);
        assert_eq!(search.origin, None);
        assert_eq!(search.radius_km, None);
    }

    #[test]
    fn resolve_keeps_recency_with_reference() {
        let query = SearchQuery {
            reference: Some(SearchReference::Point(bengaluru())),
            sort_by: SortMode::Recency,
            ..Default::default()
        };

        assert_eq!(query.resolve().unwrap().sort, SortMode::Recency);
    }

    #[test]
    fn resolve_dedups_skills_and_clamps_limit() {
        let query = SearchQuery {
            skills: vec![Skill::Suits, Skill::Bridal, Skill::Suits],
            limit: 1_000,
            ..Default::default()
        };

        let search = query.resolve().unwrap();

        assert_eq!(search.skills, vec![Skill::Bridal, Skill::Suits]);
        assert_eq!(search.limit, MAX_PAGE_SIZE);
    }
}
