//! The application error type and its RFC 7807 rendering.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use quill_core::error::RepoError;
use quill_shared::ErrorResponse;

/// Everything a handler can fail with. Each variant renders as a problem
/// body under the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            Self::NotFound(detail) => ErrorResponse::detailed(404, "Not Found", detail),
            Self::BadRequest(detail) => ErrorResponse::detailed(400, "Bad Request", detail),
            Self::Unauthorized => ErrorResponse::new(401, "Unauthorized"),
            Self::Conflict(detail) => ErrorResponse::detailed(409, "Conflict", detail),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorResponse::new(500, "Internal Server Error")
            }
            Self::Validation(problems) => {
                ErrorResponse::detailed(422, "Validation Failed", problems.join(", "))
            }
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound("resource does not exist".to_string()),
            RepoError::Constraint(msg) => Self::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => {
                tracing::error!(error = %msg, "Repository failure");
                Self::Internal("database error".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut problems: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        // Field order out of the validator is a hash map's
        problems.sort();

        Self::Validation(problems)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
