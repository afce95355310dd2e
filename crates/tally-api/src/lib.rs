//! HTTP API server for tally
//!
//! Routes are organized into modules:
//! - routes::entries: JSON entry collection API
//!
//! Static frontend assets are served from the configured directory as
//! the router fallback, so `/` resolves to its `index.html`.

pub mod error;
pub mod routes;

use axum::routing::{delete, get, post};
use axum::Router;
use tally_config::Config;
use tally_core::StoreRef;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: StoreRef,
    pub config: Config,
}

/// Create the application router
///
/// `/api/entries/reset` is a static route and takes precedence over
/// `/api/entries/:id`, so an entry whose id is literally `reset` cannot
/// be deleted through the path route.
pub fn create_router(state: AppState) -> Router {
    use routes::entries::{
        api_create_entry, api_delete_entry, api_list_entries, api_reset_entries,
    };

    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/entries", get(api_list_entries))
        .route("/api/entries", post(api_create_entry))
        .route("/api/entries/reset", post(api_reset_entries))
        .route("/api/entries/:id", delete(api_delete_entry))
        // Static frontend
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Creates the router, binds the configured address, and serves until
/// the process is stopped or the listener fails.
pub async fn start_server(config: Config, store: StoreRef) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting tally server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - GET    /api/entries (list with total)");
    log::info!("  - POST   /api/entries (create)");
    log::info!("  - DELETE /api/entries/:id (remove)");
    log::info!("  - POST   /api/entries/reset (clear)");
    log::info!("  - GET    / (static frontend)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
