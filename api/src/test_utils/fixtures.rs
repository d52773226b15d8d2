//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{Skill, TailorId, TailorProfile};

/// Create a test tailor without coordinates
pub fn test_tailor(name: &str, skills: &[Skill]) -> TailorProfile {
    TailorProfile {
        id: TailorId(Uuid::new_v4()),
        name: name.to_string(),
        latitude: None,
        longitude: None,
        location_point: None,
        skills: skills.to_vec(),
        created_at: Utc::now(),
    }
}

/// Create a test tailor with raw coordinates but no derived point
pub fn test_tailor_at(name: &str, latitude: f64, longitude: f64, skills: &[Skill]) -> TailorProfile {
    TailorProfile {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..test_tailor(name, skills)
    }
}

/// Shift a tailor's creation time into the past
pub fn created_days_ago(mut tailor: TailorProfile, days: i64) -> TailorProfile {
    tailor.created_at = Utc::now() - Duration::days(days);
    tailor
}

/// Give a tailor a fixed id, for tie-break assertions
pub fn with_id(mut tailor: TailorProfile, id: u128) -> TailorProfile {
    tailor.id = TailorId(Uuid::from_u128(id));
    tailor
}
