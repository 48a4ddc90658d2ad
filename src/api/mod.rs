use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

pub mod handlers;
pub mod router;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// Bind the listener and serve until shutdown.
pub async fn serve(cfg: Config, store: Arc<dyn Store>) -> Result<()> {
    let state = Arc::new(AppState { store });
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    tracing::info!("Server running on port {}", cfg.port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// The router plus the layers every request passes through. Integration
/// tests call this directly and drive the router without a listener.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(router::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
