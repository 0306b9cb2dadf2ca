use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for POST /sendMessage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
}

/// Response envelope from the Bot API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

/// Extra error detail the Bot API attaches to some failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseParameters {
    #[serde(default)]
    pub retry_after: Option<i64>,
}

/// Comprehensive error type for Bot API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized (bad bot token)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden (bot blocked by the chat)
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests (rate limited)
    #[error("Rate Limited. Retry after {retry_after} s")]
    RateLimited { retry_after: i64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(i32, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(i32, String),
    /// 2xx but `ok: false` in the envelope
    #[error("Rejected by API: {0}")]
    Rejected(String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
