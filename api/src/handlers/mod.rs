//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod search;

pub use search::search_tailors;
