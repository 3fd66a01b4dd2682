//! /api/files: CRUD over the flat text file store.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use file_store::FileName;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::files::files_request::{
        FileCreateRequest, FileInfo, FileResponse, FileSort, FileUpdateRequest, ListFilesQuery,
        MessageResponse,
    },
};

/// Handler: POST /api/files: creates or overwrites a file.
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FileCreateRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(body) = payload?;
    let name = FileName::parse(&body.filename)?;
    state.files.create(&name, &body.content).await?;
    Ok(message(format!("File '{name}' created successfully.")))
}

/// Handler: GET /api/files[?sort=modified]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListFilesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<FileInfo>>> {
    let Query(query) = query?;
    let files = match query.sort {
        Some(FileSort::Modified) => state
            .files
            .list_by_modified()
            .await?
            .into_iter()
            .map(FileInfo::from)
            .collect(),
        None => state
            .files
            .list()
            .await?
            .into_iter()
            .map(|filename| FileInfo {
                filename,
                last_modified: None,
            })
            .collect(),
    };
    Ok(Json(files))
}

/// Handler: GET /api/files/{filename}
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
) -> AppResult<Json<FileResponse>> {
    let Path(filename) = filename?;
    let name = FileName::parse(&filename)?;
    let content = state.files.read(&name).await?;
    Ok(Json(FileResponse { filename, content }))
}

/// Handler: PUT /api/files/{filename}: replaces the content of an existing file.
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
    payload: Result<Json<FileUpdateRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(filename) = filename?;
    let Json(body) = payload?;
    let name = FileName::parse(&filename)?;
    state.files.update(&name, &body.content).await?;
    Ok(message(format!("File '{name}' updated successfully.")))
}

/// Handler: DELETE /api/files/{filename}
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(filename) = filename?;
    let name = FileName::parse(&filename)?;
    state.files.delete(&name).await?;
    Ok(message(format!("File '{name}' deleted successfully.")))
}

fn message(message: String) -> Json<MessageResponse> {
    Json(MessageResponse { message })
}
