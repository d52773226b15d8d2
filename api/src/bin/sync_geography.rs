//! Geography sync job
//!
//! Derives `location_point` for every tailor that has coordinates but no
//! point yet. Safe to run repeatedly, by hand or from a scheduler. Exits
//! non-zero when the backfill fails so automation notices.

use std::sync::Arc;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::EnvFilter;

use tailorfind_api::adapters::PostgresGeographyRepository;
use tailorfind_api::app::GeographySyncService;
use tailorfind_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tailorfind_api=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(1)
        .connect_timeout(config.store_timeout)
        .acquire_timeout(config.store_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    let service = GeographySyncService::new(
        Arc::new(PostgresGeographyRepository::new(db.clone())),
        config.store_timeout,
    );

    let outcome = service.synchronize().await;
    db.close().await.ok();

    let report = match outcome {
        Ok(report) => report,
        Err(e) if e.is_retryable() => {
            return Err(e).context("Geography sync failed (retryable)");
        }
        Err(e) => return Err(e).context("Geography sync failed"),
    };

    println!("updated: {}", report.updated_count);
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }

    Ok(())
}
