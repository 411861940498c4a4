//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    page::index,
    table::{api_rows, api_table_event},
    tissues::api_tissues,
    volcano::api_volcano,
    string::api_string,
    system::health,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/",       get(index))
        .route("/health", get(health))

        // API endpoints
        .route("/api/rows",             get(api_rows))
        .route("/api/table/event",      post(api_table_event))
        .route("/api/tissues",          get(api_tissues))
        .route("/api/volcano/{tissue}", get(api_volcano))
        .route("/api/string",           post(api_string))

        // Static files
        .nest_service("/static", static_dir)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
