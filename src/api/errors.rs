use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::evaluation::EvaluationError;
use crate::services::evaluator::AnalyzerError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests(&'static str),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        Self::ServiceUnavailable(format!("Evaluation service unavailable: {err}"))
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        Self::ServiceUnavailable(format!("Evaluation service returned incomplete scores: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::TooManyRequests(message) => message.to_string(),
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message) => message,
            ApiError::ServiceUnavailable(message) => {
                tracing::error!(error = %message, "Service unavailable");
                message
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                message
            }
        };

        let mut response =
            (status, Json(ErrorResponse { status: status.as_u16(), detail })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
