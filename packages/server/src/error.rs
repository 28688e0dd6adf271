use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `PARENT_NOT_FOUND`, `DUPLICATE_ID`, `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "PARENT_NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Site 'S-404' does not exist")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A referenced parent row (site, turbine, blade) is absent.
    ParentNotFound(String),
    /// The primary identifier is already taken.
    Duplicate(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    /// Reports a missing parent in the wording used across all create endpoints.
    pub fn parent_not_found(entity: &str, id: &str) -> Self {
        AppError::ParentNotFound(format!("{entity} '{id}' does not exist"))
    }

    /// Map a failed insert: a unique violation becomes `Duplicate` with the
    /// given message, anything else goes through `From<DbErr>`.
    pub fn from_insert(err: DbErr, duplicate: impl FnOnce() -> String) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return AppError::Duplicate(duplicate());
        }
        err.into()
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::ParentNotFound(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "PARENT_NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Duplicate(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "DUPLICATE_ID",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violation: {detail}");
                AppError::Duplicate("Record with this identifier already exists".into())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::warn!("Foreign key violation: {detail}");
                AppError::ParentNotFound("Referenced parent record does not exist".into())
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}
