//! POST /api/ask: forwards a question to the provider and records the answer.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use file_store::{FileName, FileStore};
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /api/ask
///
/// The gateway is called first, so a failed call leaves no history row.
/// The answer is also mirrored into the file store; that copy is best-effort.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is a React hook?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(body) = payload?;
    let question = body
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("question is required".into()))?;

    info!(question = %question, "received question");

    let answer = state.gateway.ask(&question).await?;
    state.history.insert(question.clone(), answer.clone()).await?;
    mirror_to_file(&state.files, &question, &answer).await;

    Ok(Json(AskResponse { answer }))
}

async fn mirror_to_file(files: &FileStore, question: &str, answer: &str) {
    let name = FileName::from_question(question);
    match files.create(&name, answer).await {
        Ok(()) => info!(file = %name, "saved question and answer to file"),
        Err(e) => warn!(file = %name, error = %e, "error saving answer to file"),
    }
}
