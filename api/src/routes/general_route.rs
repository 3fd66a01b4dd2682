//! Small informational endpoints used by the frontend.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;
use crate::routes::files::files_request::MessageResponse;

#[derive(Debug, Serialize)]
pub struct VideoIdResponse {
    pub video_id: String,
}

/// Handler: GET /
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the ReactJS Learning Assistant API!".into(),
    })
}

/// Handler: GET /api/test: connectivity check for the frontend.
pub async fn test_api() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from Backend API!".into(),
    })
}

/// Handler: GET /video_id
pub async fn video_id(State(state): State<Arc<AppState>>) -> Json<VideoIdResponse> {
    Json(VideoIdResponse {
        video_id: state.video_id.clone(),
    })
}
