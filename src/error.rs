// src/error.rs
//! Error types for the scoring core and the HTTP boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures of the polarity engine, either at startup or while scoring.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown sentiment engine: {0}")]
    Unknown(String),

    #[error("engine returned no compound score")]
    MissingCompound,

    #[error("compound score out of range: {0}")]
    OutOfRange(f64),

    #[error("engine failure: {0}")]
    Failed(String),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body failed to deserialize into the request schema. Nothing was scored.
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    /// An item failed to score; the whole batch is dropped.
    #[error("scoring failed: {0}")]
    Scoring(#[from] EngineError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { status, .. } => *status,
            ApiError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = match &self {
            ApiError::Validation { message, .. } => {
                warn!(%status, detail = %message, "request rejected");
                metrics::counter!("sentiment_rejected_total").increment(1);
                "validation_error"
            }
            ApiError::Scoring(e) => {
                error!(error = %e, "batch aborted");
                "scoring_error"
            }
        };
        let body = ErrorBody {
            error: kind,
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
