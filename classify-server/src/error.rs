use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use vision::VisionError;

/// Anything that stops a request. All of it is reported as a 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read request body: {0}")]
    Body(#[from] axum::extract::rejection::BytesRejection),
    #[error("invalid request body: {0}")]
    Request(#[from] serde_json::Error),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("classification task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!(%message, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
    }
}
