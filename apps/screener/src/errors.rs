use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::analysis::AnalysisReport;

/// Domain error raised by the analysis pipeline.
///
/// Absence of signal (no email, no dates, empty sections) is never an error;
/// the only failure is a document with no usable text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Could not extract text.")]
    UnreadableDocument,
}

impl AnalysisError {
    /// The persisted `{"Error": "..."}` form of this failure.
    pub fn to_report(&self) -> AnalysisReport {
        match self {
            AnalysisError::UnreadableDocument => AnalysisReport::unreadable(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Analysis(e) => {
                tracing::warn!("Analysis failed: {e}");
                // Analysis failures use the persisted error form, not the service envelope.
                return (StatusCode::UNPROCESSABLE_ENTITY, e.to_report()).into_response();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Reports go out byte-for-byte in their persisted form.
impl IntoResponse for AnalysisReport {
    fn into_response(self) -> Response {
        match self.to_persisted_json() {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(e) => AppError::Internal(e.into()).into_response(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor rejections
// ────────────────────────────────────────────────────────────────────────────

/// Body-limit rejections keep their 413; every other malformed request is a 400.
fn rejection(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        rejection(e.status(), e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        rejection(e.status(), e.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        rejection(e.status(), e.body_text())
    }
}
