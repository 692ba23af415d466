use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jobmatch_core::MatchError;
use serde_json::json;
use thiserror::Error;

/// Service-level error type; handlers return `Result<T, ApiError>`. Core
/// failures map onto status codes here and nowhere else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Match(MatchError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            ApiError::Match(err @ MatchError::ExtractionFailure(_)) => {
                tracing::error!(error = %err, "resume extraction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_FAILURE",
                    err.to_string(),
                )
            }
            ApiError::Match(err @ MatchError::CorpusUnavailable(_)) => {
                tracing::error!(error = %err, "match request refused");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CORPUS_UNAVAILABLE",
                    err.to_string(),
                )
            }
            ApiError::Match(err @ MatchError::VectorizationFailure(_)) => {
                tracing::error!(error = %err, "scoring failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "VECTORIZATION_FAILURE",
                    err.to_string(),
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
