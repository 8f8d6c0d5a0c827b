//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Stateless resolution
        .route("/resolve", post(handlers::resolve::resolve))
        .route("/rules", get(handlers::rules::list_rules))
        // Widget sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route(
            "/sessions/{id}/messages",
            post(handlers::session::submit_message),
        )
        .route(
            "/sessions/{id}/toggle-open",
            post(handlers::session::toggle_open),
        )
        .route(
            "/sessions/{id}/toggle-minimize",
            post(handlers::session::toggle_minimize),
        )
        .route(
            "/sessions/{id}/cancel",
            post(handlers::session::cancel_pending),
        )
        .route("/sessions/{id}/ws", get(handlers::ws::ws_handler));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
