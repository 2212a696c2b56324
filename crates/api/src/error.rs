use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::models::share_link::ShareAccessDenied;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Share link has been deactivated")]
    ShareLinkDeactivated,

    #[error("Share link has expired")]
    ShareLinkExpired,

    #[error("Share link view limit exceeded")]
    ShareLinkViewLimit,

    #[error("Share link password required")]
    SharePasswordRequired,

    #[error("Invalid share link password")]
    ShareInvalidPassword,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            // Share-link denials are deliberately distinct: the viewer UI
            // re-prompts on the password outcomes and dead-ends on the rest.
            ApiError::ShareLinkDeactivated => (
                StatusCode::FORBIDDEN,
                "share_link_deactivated",
                "This share link has been deactivated".into(),
            ),
            ApiError::ShareLinkExpired => (
                StatusCode::FORBIDDEN,
                "share_link_expired",
                "This share link has expired".into(),
            ),
            ApiError::ShareLinkViewLimit => (
                StatusCode::FORBIDDEN,
                "view_limit_exceeded",
                "This share link has reached its maximum number of views".into(),
            ),
            ApiError::SharePasswordRequired => (
                StatusCode::UNAUTHORIZED,
                "password_required",
                "This share link requires a password".into(),
            ),
            ApiError::ShareInvalidPassword => (
                StatusCode::UNAUTHORIZED,
                "invalid_password",
                "The provided password is incorrect".into(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShareAccessDenied> for ApiError {
    fn from(denied: ShareAccessDenied) -> Self {
        match denied {
            ShareAccessDenied::Deactivated => ApiError::ShareLinkDeactivated,
            ShareAccessDenied::Expired => ApiError::ShareLinkExpired,
            ShareAccessDenied::ViewLimitExceeded => ApiError::ShareLinkViewLimit,
            ShareAccessDenied::PasswordRequired => ApiError::SharePasswordRequired,
            ShareAccessDenied::InvalidPassword => ApiError::ShareInvalidPassword,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();

        ApiError::Validation(messages.join("; "))
    }
}
