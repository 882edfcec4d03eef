//! Error types for Casefile API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use workflow_engine::WorkflowError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Accused not found: {0}")]
    AccusedNotFound(String),

    #[error("Memo not found: {0}")]
    MemoNotFound(String),

    #[error("Challan not found for case: {0}")]
    ChallanNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("PDF generation failed: {0}")]
    Pdf(#[from] memo_pdf::MemoPdfError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::CaseNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Case not found: {}", id))
            }
            ApiError::AccusedNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Accused not found: {}", id))
            }
            ApiError::MemoNotFound(detail) => {
                (StatusCode::NOT_FOUND, format!("Memo not found: {}", detail))
            }
            ApiError::ChallanNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Challan not found for case: {}", id),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Workflow(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Pdf(err) => {
                tracing::error!("PDF generation error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF generation failed".to_string(),
                )
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
