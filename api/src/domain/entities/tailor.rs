//! Tailor domain entity
//!
//! A tailor profile as seen by geospatial discovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::GeoPoint;

/// Unique identifier for a tailor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TailorId(pub Uuid);

impl TailorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TailorId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TailorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TailorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Skill tags a tailor can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Alterations,
    Blouses,
    Bridal,
    Embroidery,
    Kurtas,
    Lehengas,
    Sherwanis,
    Shirts,
    Suits,
    Trousers,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::Alterations,
        Skill::Blouses,
        Skill::Bridal,
        Skill::Embroidery,
        Skill::Kurtas,
        Skill::Lehengas,
        Skill::Sherwanis,
        Skill::Shirts,
        Skill::Suits,
        Skill::Trousers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Alterations => "alterations",
            Skill::Blouses => "blouses",
            Skill::Bridal => "bridal",
            Skill::Embroidery => "embroidery",
            Skill::Kurtas => "kurtas",
            Skill::Lehengas => "lehengas",
            Skill::Sherwanis => "sherwanis",
            Skill::Shirts => "shirts",
            Skill::Suits => "suits",
            Skill::Trousers => "trousers",
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.as_str() == wanted)
            .ok_or_else(|| format!("Unknown skill: {}", s))
    }
}

/// A tailor profile with its raw and derived location
#[derive(Debug, Clone, Serialize)]
pub struct TailorProfile {
    pub id: TailorId,
    pub name: String,
    /// Raw WGS-84 latitude as entered at registration
    pub latitude: Option<f64>,
    /// Raw WGS-84 longitude as entered at registration
    pub longitude: Option<f64>,
    /// Geography point derived from the raw coordinates by the synchronizer
    pub location_point: Option<GeoPoint>,
    pub skills: Vec<Skill>,
    pub created_at: DateTime<Utc>,
}

impl TailorProfile {
    /// Raw coordinates, when both halves are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// True when raw coordinates exist but no point has been derived yet
    pub fn needs_location_sync(&self) -> bool {
        self.coordinates().is_some() && self.location_point.is_none()
    }

    pub fn has_any_skill(&self, skills: &[Skill]) -> bool {
        skills.iter().any(|s| self.skills.contains(s))
    }

    pub fn has_all_skills(&self, skills: &[Skill]) -> bool {
        skills.iter().all(|s| self.skills.contains(s))
    }
}
