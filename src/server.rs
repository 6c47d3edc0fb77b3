//! Server initialization and lifecycle.
//!
//! Wires the database pool, the broker publisher and the rotation service,
//! then runs the HTTP server until a termination signal arrives.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::infrastructure::broker::AmqpPublisher;
use crate::infrastructure::persistence::PgRotationRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the service with the given configuration.
///
/// # Shutdown
///
/// On SIGINT/SIGTERM the server stops accepting new connections and drains
/// in-flight requests; afterwards the broker connection is closed, then the
/// database pool — in that order.
///
/// # Errors
///
/// Returns an error if the database connection, migration, broker setup or
/// server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db.maxopenconnections)
        .min_connections(config.db.maxidleconnections)
        .max_lifetime(config.db.max_connection_lifetime())
        .connect(&config.db.dsn)
        .await
        .context("failed to connect to the database")?;
    tracing::info!("connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let publisher = Arc::new(
        AmqpPublisher::connect(&config.publisher)
            .await
            .context("failed to start stats publisher")?,
    );

    let repository = Arc::new(PgRotationRepository::new(Arc::new(pool.clone())));
    let state = AppState::new(repository, publisher.clone());
    let app = app_router(state, config.server.connection_timeout());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("http server stopped");

    // Broker first, pool second.
    if let Err(e) = publisher.close().await {
        tracing::error!(error = %e, "error during stats publisher stopping");
    }
    pool.close().await;
    tracing::info!("shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C (all platforms) or SIGTERM (Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
