use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::ErrorResponse;

/// Failure modes surfaced by the API. Every handler returns
/// `Result<_, ApiError>`; the `IntoResponse` impl below is the single
/// place where error kinds map to HTTP statuses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Add on a relation row that is already present.
    #[error("{0}")]
    AlreadyExists(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Cannot subscribe to yourself")]
    SelfReference,

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(&'static str),

    /// Uniqueness, referential or check constraint rejected by the database.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database connection failed")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            | Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
            | Error::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                ApiError::Constraint(info.message().to_string())
            }
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation { .. }
            | ApiError::AlreadyExists(_)
            | ApiError::SelfReference => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Constraint(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Pool(e) => {
                tracing::error!("Database connection failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database connection failed".to_string(),
                )
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
