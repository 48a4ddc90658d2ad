use thiserror::Error;

use crate::db::StoreError;

/// Application error type for API responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// A write collided with an existing unique value. Reported as a 400
    /// with the message in the body.
    #[error("{0}")]
    Conflict(String),

    /// Login failure. Reported as a 401; the body says whether the account
    /// or the password was wrong.
    #[error("{0}")]
    AuthFailed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Duplicate(_) => AppError::Conflict(err.to_string()),
            StoreError::MalformedId(_) | StoreError::Backend(_) => {
                AppError::Database(err.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match &self {
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::AuthFailed(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Database(_) | AppError::Internal(_) => {
                // The detail goes to the log; the client gets a generic body.
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
