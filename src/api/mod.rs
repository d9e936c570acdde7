//! HTTP query API over the savings simulation.
//!
//! Provides four GET endpoints:
//! - `/` — service banner
//! - `/health` — liveness probe
//! - `/states` — states with their regulated tariffs
//! - `/simulate?state=SP&consumption_kwh=30000` — savings simulation

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use rust_decimal::Decimal;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::catalog::Catalog;

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup and wrapped in `Arc`; no locks needed since
/// all data is read-only.
pub struct AppState {
    /// Reference data simulations run against.
    pub catalog: Catalog,
    /// Largest consumption accepted from callers (kWh).
    pub max_consumption_kwh: Decimal,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `permissive_cors` - Whether to accept cross-origin requests from any origin
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>, permissive_cors: bool) -> Router {
    let app = Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/states", get(handlers::get_states))
        .route("/simulate", get(handlers::get_simulation))
        .with_state(state);

    if permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    permissive_cors: bool,
) -> std::io::Result<()> {
    let app = router(state, permissive_cors);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
