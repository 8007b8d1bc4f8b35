//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend from configuration, builds the router, and
//! runs the Axum server until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{FileRepository, InMemoryRepository, PgUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Builds the repository the configuration selects.
///
/// Precedence: database, then file, then in-memory. For the database
/// backend this connects the pool and applies migrations; for the file
/// backend it opens the storage file and replays it into the index.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(database_url)
            .await
            .context("failed to connect to database")?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply migrations")?;

        return Ok(Arc::new(PgUrlRepository::new(Arc::new(pool))));
    }

    if let Some(path) = &config.file_storage_path {
        let repository = FileRepository::open(path).await.with_context(|| {
            format!("failed to open storage file '{}'", path.display())
        })?;
        tracing::info!(path = %path.display(), "File storage ready");

        return Ok(Arc::new(repository));
    }

    tracing::info!("Using in-memory storage");
    Ok(Arc::new(InMemoryRepository::new()))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let state = AppState::new(repository, &config.base_url, &config.cookie_secret);
    let app = app_router(state);

    // ToSocketAddrs resolution, so "localhost:8080" works as an address.
    let listener = tokio::net::TcpListener::bind(config.server_addr.as_str())
        .await
        .with_context(|| format!("failed to bind '{}'", config.server_addr))?;
    tracing::info!("Listening on http://{}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Completes on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
