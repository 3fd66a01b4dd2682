//! GET/PUT /api/history: question/answer history.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use history_store::HistoryRecord;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::history::history_request::HistoryItemUpdate,
};

/// Handler: GET /api/history: most recent first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    Ok(Json(state.history.list_all().await?))
}

/// Handler: GET /api/history/{id}
pub async fn get_history_item(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<HistoryRecord>> {
    let Path(id) = id?;
    Ok(Json(state.history.get_by_id(id).await?))
}

/// Handler: PUT /api/history/{id}: replaces question and answer.
pub async fn update_history_item(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<HistoryItemUpdate>, JsonRejection>,
) -> AppResult<Json<HistoryRecord>> {
    let Path(id) = id?;
    let Json(update) = payload?;
    if update.question.trim().is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }

    let record = state
        .history
        .update(id, update.question, update.answer)
        .await?;
    Ok(Json(record))
}
