//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod geography_sync_service;
pub mod search_service;

pub use geography_sync_service::GeographySyncService;
pub use search_service::TailorSearchService;
