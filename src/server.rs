//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring, and Axum server lifecycle.

use crate::application::services::{AllocationConfig, AuthService, ReservationConfig};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{SlugReservationRepository, UrlEntryRepository};
use crate::infrastructure::memory::{MemorySlugReservationRepository, MemoryUrlEntryRepository};
use crate::infrastructure::persistence::{PgSlugReservationRepository, PgUrlEntryRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

type Stores = (
    Arc<dyn UrlEntryRepository>,
    Arc<dyn SlugReservationRepository>,
);

/// Opens a PostgreSQL pool using the pool settings from `config`.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the stores for the configured backend.
///
/// With PostgreSQL, pending migrations are applied first.
async fn build_stores(config: &Config) -> Result<Stores> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Ok((
                Arc::new(PgUrlEntryRepository::new(pool.clone())),
                Arc::new(PgSlugReservationRepository::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Ok((
                Arc::new(MemoryUrlEntryRepository::new()),
                Arc::new(MemorySlugReservationRepository::new()),
            ))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory maps)
/// - Allocation, reservation and shortening services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (url_entries, reservations) = build_stores(&config).await?;

    let state = AppState::new(
        url_entries,
        reservations,
        AllocationConfig {
            max_attempts: config.max_allocation_attempts,
        },
        ReservationConfig {
            reservation_duration: config.reservation_duration(),
        },
        AuthService::new(config.allowed_api_tokens.iter().cloned()),
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
