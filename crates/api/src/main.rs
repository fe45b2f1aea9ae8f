//! Notification service binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use earn_common::config::AppConfig;
use earn_common::db::create_pool;
use earn_engine::store::PgNotificationStore;
use earn_notifier::ResendClient;

use earn_api::routes::create_router;
use earn_api::state::AppState;

/// Largest accepted request body. Only the submission endpoint reads one.
const BODY_LIMIT_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("earn_api=debug,earn_engine=debug,earn_notifier=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting notification service...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database pool created");

    let store = Arc::new(PgNotificationStore::new(pool));
    let mailer = Arc::new(ResendClient::new(
        config.resend_api_url.clone(),
        config.resend_api_key.clone(),
    ));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .map_err(|_| anyhow::anyhow!("LISTEN_ADDR must be a socket address, got {}", config.listen_addr))?;

    // Build application state
    let state = AppState::new(config, store, mailer);

    // Build router
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
