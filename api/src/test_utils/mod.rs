//! Test utilities
//!
//! In-memory port implementations and test fixtures for unit testing.
//!
//! The in-memory store mirrors the PostGIS semantics closely enough for
//! service and handler tests (haversine instead of the spheroid). Queries
//! that depend on exact PostGIS behaviour live in the ignored PostgreSQL
//! integration tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
