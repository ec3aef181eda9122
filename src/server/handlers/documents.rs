//! Document listing and detail endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::super::AppState;
use crate::graph::dependency_graph;
use crate::highlight;
use crate::pager::{Direction, PageRequest};
use crate::search::{LmFilter, SearchCriteria};

/// Query parameters for the paginated document listing.
#[derive(Debug, Deserialize)]
pub struct DocsQuery {
    /// Language collection to page through.
    pub lang: Option<String>,
    /// Anchor document id; empty or absent means start of collection.
    pub anchor: Option<String>,
    /// Page size (clamped to 1..=200).
    pub batch_size: Option<usize>,
    /// Scan direction: true (default) pages forward from the anchor.
    pub up: Option<bool>,
    /// JSON-encoded search criteria object.
    pub search: Option<String>,
}

/// One row of the document listing.
#[derive(Debug, Serialize)]
pub struct DocumentListItem {
    pub id: String,
    pub text: String,
    /// Total annotations on the document.
    pub lm_count: usize,
    /// Annotations matching every active criterion.
    pub matched: usize,
    /// Text with matching source/target spans wrapped in class-tagged
    /// HTML spans.
    pub highlighted: String,
}

/// Listing response. Store failures surface as an empty `docs` list
/// with the `error` field set, never as a retry.
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub docs: Vec<DocumentListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentListResponse {
    fn failure(message: String) -> Self {
        Self {
            docs: Vec::new(),
            first_id: None,
            last_id: None,
            error: Some(message),
        }
    }
}

/// List one page of documents, filtered by the active search criteria.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocsQuery>,
) -> impl IntoResponse {
    let lang = match params.lang {
        Some(lang) if !lang.is_empty() => lang,
        _ => {
            return Json(DocumentListResponse::failure(
                "missing 'lang' parameter".to_string(),
            ))
            .into_response();
        }
    };

    let criteria = match params.search.as_deref() {
        Some(raw) if !raw.is_empty() => match SearchCriteria::from_json(raw) {
            Ok(criteria) => criteria,
            Err(e) => {
                return Json(DocumentListResponse::failure(format!(
                    "invalid search criteria: {e}"
                )))
                .into_response();
            }
        },
        _ => SearchCriteria::new(),
    };
    let filter = LmFilter::build(&criteria);

    let batch_size = params
        .batch_size
        .unwrap_or(state.batch_size)
        .clamp(1, 200);
    let direction = if params.up.unwrap_or(true) {
        Direction::Forward
    } else {
        Direction::Backward
    };
    let request = PageRequest::at(
        params.anchor.as_deref().unwrap_or(""),
        direction,
        batch_size,
    );

    let repo = state.repo.clone();
    let fetch = {
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || repo.find_page(&lang, &filter, &request)).await
    };

    let docs = match fetch {
        Ok(Ok(docs)) => docs,
        Ok(Err(e)) => {
            tracing::warn!("document page fetch failed: {e}");
            return Json(DocumentListResponse::failure(e.to_string())).into_response();
        }
        Err(e) => {
            return Json(DocumentListResponse::failure(e.to_string())).into_response();
        }
    };

    let first_id = docs.first().map(|d| d.id.clone());
    let last_id = docs.last().map(|d| d.id.clone());
    let items: Vec<DocumentListItem> = docs
        .into_iter()
        .map(|doc| {
            let matched = filter.select(&doc.lms).len();
            let highlighted = highlight::highlighted_text(&doc, &filter);
            DocumentListItem {
                id: doc.id,
                text: doc.text,
                lm_count: doc.lms.len(),
                matched,
                highlighted,
            }
        })
        .collect();

    Json(DocumentListResponse {
        docs: items,
        first_id,
        last_id,
        error: None,
    })
    .into_response()
}

/// Get a single document by id, as stored.
pub async fn get_document(
    State(state): State<AppState>,
    Path((lang, doc_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let repo = state.repo.clone();
    let result = tokio::task::spawn_blocking(move || repo.get(&lang, &doc_id)).await;

    match result {
        Ok(Ok(Some(doc))) => Json(doc).into_response(),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "document not found" })),
        )
            .into_response(),
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Get the dependency node/edge list for a document, ready for the
/// front end's graph-layout library.
pub async fn document_graph(
    State(state): State<AppState>,
    Path((lang, doc_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let repo = state.repo.clone();
    let result = tokio::task::spawn_blocking(move || repo.get(&lang, &doc_id)).await;

    match result {
        Ok(Ok(Some(doc))) => Json(dependency_graph(&doc)).into_response(),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "document not found" })),
        )
            .into_response(),
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
