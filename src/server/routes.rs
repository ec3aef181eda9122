//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Collection registry
        .route("/api/languages", get(handlers::list_languages))
        // Paginated, filterable document listing. POST is accepted for
        // long criteria strings; parameters ride the query string either
        // way.
        .route(
            "/api/docs",
            get(handlers::list_documents).post(handlers::list_documents),
        )
        // Single document and its dependency graph
        .route("/api/docs/:lang/:doc_id", get(handlers::get_document))
        .route("/api/docs/:lang/:doc_id/graph", get(handlers::document_graph))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
