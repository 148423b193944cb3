use gloo::net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use shared::{CreateExpenseRequest, ErrorKind, ErrorResponse, Expense};
use thiserror::Error;

use super::config::ClientConfig;

/// Failures talking to the storage service. The display text is what the
/// error banner shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server {
        status: u16,
        kind: Option<ErrorKind>,
        message: String,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Interpret a non-2xx response body, preferring the service's JSON error shape
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => ApiError::Server {
                status,
                kind: Some(parsed.kind),
                message: parsed.error,
            },
            Err(_) => ApiError::Server {
                status,
                kind: None,
                message: if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                },
            },
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Server { kind, .. } => *kind,
            _ => None,
        }
    }
}

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// API client for communicating with the expense service
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn expenses_url(&self) -> String {
        format!("{}/api/expenses", self.base_url)
    }

    pub fn monthly_expenses_url(&self, user_id: &str, month: &str) -> String {
        format!(
            "{}/{}/{}",
            self.expenses_url(),
            utf8_percent_encode(user_id, PATH_SEGMENT),
            utf8_percent_encode(month, PATH_SEGMENT)
        )
    }

    /// Get every expense for a user and month
    pub async fn list_expenses(&self, user_id: &str, month: &str) -> Result<Vec<Expense>, ApiError> {
        let url = self.monthly_expenses_url(user_id, month);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    /// Store a new expense, returning the record as the service stored it
    pub async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        let response = Request::post(&self.expenses_url())
            .json(request)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_error_body(status, &body))
        }
    }
}
