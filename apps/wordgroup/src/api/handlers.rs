//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ErrorResponse, GroupRequest, GroupResponse, HealthResponse, LookupQuery, SaveRequest,
        SavedResponse,
    },
};
use crate::ClientError;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use wordgroup_core::{Page, Relation};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// GROUP HANDLER
// =============================================================================

/// Group the posted records by a field.
pub async fn group_handler(Json(request): Json<GroupRequest>) -> Response {
    match request.execute() {
        Ok(grouping) => (StatusCode::OK, Json(GroupResponse::from(grouping))).into_response(),
        Err(e) => {
            tracing::debug!("Group request rejected: {}", e);
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

// =============================================================================
// LOOKUP HANDLERS
// =============================================================================

/// Words rhyming with `?word=`, sectioned by syllable count.
pub async fn rhymes_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    lookup(&state, Relation::Rhymes, &query.word).await
}

/// Words similar in meaning to `?word=`.
pub async fn similar_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    lookup(&state, Relation::MeansLike, &query.word).await
}

async fn lookup(state: &AppState, relation: Relation, word: &str) -> Response {
    let entries = match state.client.fetch(relation, word).await {
        Ok(entries) => entries,
        Err(ClientError::InvalidWord) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(ClientError::InvalidWord.to_string())),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Lookup of {} for '{}' failed: {}", relation, word, e);
            return (StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(e.to_string())))
                .into_response();
        }
    };

    match Page::for_relation(relation, word.trim(), entries) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(format!("Unusable word API response: {e}"))),
        )
            .into_response(),
    }
}

// =============================================================================
// SAVED WORDS HANDLERS
// =============================================================================

/// List saved words.
pub async fn saved_handler(State(state): State<AppState>) -> impl IntoResponse {
    let saved = state.saved.read().await;
    (StatusCode::OK, Json(SavedResponse::from(&*saved)))
}

/// Save a word.
pub async fn save_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Response {
    let mut saved = state.saved.write().await;
    match saved.add(&request.word) {
        Ok(()) => {
            tracing::info!(count = saved.len(), "Saved word '{}'", request.word.trim());
            (StatusCode::OK, Json(SavedResponse::from(&*saved))).into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response(),
    }
}
