//! TailorFind API
//!
//! Geospatial discovery of tailors: a geography backfill job and a proximity
//! search engine over PostgreSQL/PostGIS.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;

#[cfg(test)]
mod test_utils;


use app::TailorSearchService;
use domain::ports::TailorSearchRepository;

/// Application state shared across all handlers
pub struct AppState<TR>
where
    TR: TailorSearchRepository,
{
    pub search_service: Arc<TailorSearchService<TR>>,
}

impl<TR> Clone for AppState<TR>
where
    TR: TailorSearchRepository,
{
    fn clone(&self) -> Self {
        Self {
            search_service: self.search_service.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn router<TR>(state: AppState<TR>) -> Router
where
    TR: TailorSearchRepository + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/tailors/search", get(handlers::search_tailors::<TR>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
