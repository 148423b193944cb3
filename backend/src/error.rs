use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorKind, ErrorResponse};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpenseError>;

/// Errors surfaced by the expense storage service
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// The create payload could not be coerced into an expense record
    #[error("Expense validation failed: {0}")]
    Validation(String),

    /// The store could not be reached or rejected the statement
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ExpenseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ExpenseError::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpenseError::Validation(_) => ErrorKind::Validation,
            ExpenseError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ExpenseError::Validation(_) => StatusCode::BAD_REQUEST,
            ExpenseError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error body under a caller-chosen status, keeping the kind
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        let body = ErrorResponse::new(self.kind(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ExpenseError {
    fn from(err: sqlx::Error) -> Self {
        ExpenseError::StorageUnavailable(err.to_string())
    }
}

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.into_response_with_status(status)
    }
}
