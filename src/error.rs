use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::store::StoreError;

/// Request-level failure taxonomy. Validation, not-found and wrong-password
/// outcomes carry a message the client may show; everything else is redacted
/// to a generic 500 body and logged server-side.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Wrong password")]
    WrongPassword,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, (*what).to_string()),
            AppError::WrongPassword => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Store(e) => {
                error!(error = %e, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Session(e) => {
                error!(error = %e, "session operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        if status.is_client_error() {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let res = AppError::Validation("title must be between 1 and 150 characters".into())
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_and_wrong_password_stay_distinct() {
        let not_found = AppError::NotFound("Username not found").into_response();
        let wrong_password = AppError::WrongPassword.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_errors_are_redacted() {
        let res = AppError::Store(StoreError::Database(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
