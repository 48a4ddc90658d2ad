use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

use super::handlers;
use super::AppState;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::health::root))
        // Record collection
        .route("/add", post(handlers::records::create))
        .route("/users", get(handlers::records::list))
        .route(
            "/users/{id}",
            put(handlers::records::update).delete(handlers::records::delete),
        )
        .route("/search/{name}", get(handlers::records::search))
        // Accounts
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        // Blog collection
        .route(
            "/blogs",
            get(handlers::blogs::list).post(handlers::blogs::create),
        )
        .route("/blogs/{id}", delete(handlers::blogs::delete))
        .with_state(state)
}
