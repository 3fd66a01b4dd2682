use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use file_store::errors::FileStoreError;
use history_store::errors::HistoryError;
use prompt_gateway::GatewayError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::config::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    /// Same text as `message`, under the key the web client reads.
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        }
        let message = self.to_string();
        let body = ErrorBody {
            error: self.error_code(),
            detail: message.clone(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

/// Missing credential → 500, unreachable provider → 503, anything else → 500.
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        if err.is_unavailable() {
            return AppError::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "GATEWAY_UNAVAILABLE",
                message: format!("Failed to communicate with Gemini API: {err}"),
            };
        }
        match err {
            GatewayError::Config(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CONFIG_ERROR",
                message: e.to_string(),
            },
            other => {
                AppError::Internal(format!("Internal server error processing response: {other}"))
            }
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Internal(format!("Database error: {other}")),
        }
    }
}

impl From<FileStoreError> for AppError {
    fn from(err: FileStoreError) -> Self {
        match err {
            FileStoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            FileStoreError::InvalidName { .. } => AppError::BadRequest(err.to_string()),
            FileStoreError::Io(e) => AppError::Internal(format!("File error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(HistoryError::NotFound(7)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FileStoreError::NotFound("a.txt".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FileStoreError::InvalidName {
                name: "../x".into(),
                reason: "contains a path separator or NUL".into(),
            })
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FileStoreError::Io(std::io::Error::other("disk full"))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn gateway_errors_map_to_statuses() {
        let missing_key = AppError::from(GatewayError::from(
            prompt_gateway::ConfigError::MissingApiKey,
        ));
        assert_eq!(missing_key.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing_key.error_code(), "CONFIG_ERROR");

        let upstream = AppError::from(GatewayError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            url: "http://x".into(),
            snippet: String::new(),
        });
        assert_eq!(upstream.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream.error_code(), "GATEWAY_UNAVAILABLE");

        let decode = AppError::from(GatewayError::Decode("bad".into()));
        assert_eq!(decode.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(decode.error_code(), "INTERNAL_ERROR");
    }
}
