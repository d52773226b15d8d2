//! Locality zones
//!
//! Named neighbourhoods that stand in for raw coordinates in a search.

use serde::Serialize;

use super::geo::GeoPoint;

/// A pre-registered named reference point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalityZone {
    Indiranagar,
    Koramangala,
    Jayanagar,
    Whitefield,
    MgRoad,
    Malleshwaram,
    HsrLayout,
    ElectronicCity,
    Basavanagudi,
    Yelahanka,
}

impl LocalityZone {
    pub const ALL: [LocalityZone; 10] = [
        LocalityZone::Indiranagar,
        LocalityZone::Koramangala,
        LocalityZone::Jayanagar,
        LocalityZone::Whitefield,
        LocalityZone::MgRoad,
        LocalityZone::Malleshwaram,
        LocalityZone::HsrLayout,
        LocalityZone::ElectronicCity,
        LocalityZone::Basavanagudi,
        LocalityZone::Yelahanka,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LocalityZone::Indiranagar => "indiranagar",
            LocalityZone::Koramangala => "koramangala",
            LocalityZone::Jayanagar => "jayanagar",
            LocalityZone::Whitefield => "whitefield",
            LocalityZone::MgRoad => "mg_road",
            LocalityZone::Malleshwaram => "malleshwaram",
            LocalityZone::HsrLayout => "hsr_layout",
            LocalityZone::ElectronicCity => "electronic_city",
            LocalityZone::Basavanagudi => "basavanagudi",
            LocalityZone::Yelahanka => "yelahanka",
        }
    }

    /// Fixed reference point of the zone
    pub fn reference_point(&self) -> GeoPoint {
        let (lat, lon) = match self {
            LocalityZone::Indiranagar => (12.9719, 77.6412),
            LocalityZone::Koramangala => (12.9352, 77.6245),
            LocalityZone::Jayanagar => (12.9250, 77.5938),
            LocalityZone::Whitefield => (12.9698, 77.7500),
            LocalityZone::MgRoad => (12.9756, 77.6066),
            LocalityZone::Malleshwaram => (13.0031, 77.5643),
            LocalityZone::HsrLayout => (12.9116, 77.6474),
            LocalityZone::ElectronicCity => (12.8452, 77.6602),
            LocalityZone::Basavanagudi => (12.9406, 77.5738),
            LocalityZone::Yelahanka => (13.1007, 77.5963),
        };
        GeoPoint::from_trusted(lat, lon)
    }

    /// Look a zone up by code.
    ///
    /// Case-insensitive; `-` and spaces are accepted in place of `_`.
    /// Returns `None` for unknown names, which callers treat as "no matches".
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|zone| zone.code() == normalized)
    }
}

impl std::fmt::Display for LocalityZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
