//! Domain entities
//!
//! Pure domain models for tailor discovery.

pub mod geo;
pub mod locality;
pub mod search;
pub mod sync;
pub mod tailor;

pub use geo::{GeoPoint, WGS84_SRID};
pub use locality::LocalityZone;
pub use search::{
    ProximitySearch, SearchQuery, SearchReference, SkillMatch, SortMode, TailorMatch,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use sync::{CapabilityStatus, SyncReport};
pub use tailor::{Skill, TailorId, TailorProfile};
