//! Language registry endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::super::AppState;
use crate::models::Language;

/// List available per-language collections with display names.
pub async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    let repo = state.repo.clone();
    let result = tokio::task::spawn_blocking(move || repo.languages()).await;

    match result {
        Ok(Ok(codes)) => {
            let languages: Vec<Language> =
                codes.iter().map(|code| Language::from_code(code)).collect();
            Json(languages).into_response()
        }
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
