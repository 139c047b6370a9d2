//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, service wiring, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (the `links` schema is ensured lazily by the
///   repository on first use)
/// - Link service and shared state
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, server bind, or server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let mut connect_options = PgConnectOptions::from_str(&config.database_url)?;
    if config.database_tls_insecure {
        // Encrypt the connection but skip certificate verification.
        connect_options = connect_options.ssl_mode(PgSslMode::Require);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect_with(connect_options)
        .await?;
    tracing::info!("Connected to database");

    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool));
    let link_service = Arc::new(LinkService::new(link_repository));
    let state = AppState::new(link_service);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
