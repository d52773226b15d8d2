//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM, PostgreSQL and PostGIS.

pub mod geography_repo;
pub mod search_sql;
pub mod tailor_search_repo;


pub use geography_repo::PostgresGeographyRepository;
pub use tailor_search_repo::PostgresTailorSearchRepository;

use sea_orm::DbErr;

use crate::error::DomainError;

/// Classify a SeaORM error. Connection problems are retryable, the rest are not.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => DomainError::Unavailable(e.to_string()),
        _ => DomainError::Database(e.to_string()),
    }
}
