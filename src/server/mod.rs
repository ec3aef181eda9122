//! Web server for browsing annotated documents.
//!
//! Thin JSON API over the document store: collection listing, anchored
//! page fetches with search criteria, single-document retrieval, and
//! dependency-graph derivation. Pagination state (the boundary stack)
//! lives with the caller, so the API itself is stateless.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::DocumentRepository;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<DocumentRepository>,
    /// Default page size when the request does not name one.
    pub batch_size: usize,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let repo = DocumentRepository::new(&settings.db_path)?;
        Ok(Self {
            repo: Arc::new(repo),
            batch_size: settings.batch_size,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
