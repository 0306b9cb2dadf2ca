use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{ApiError, SendMessageRequest, SendMessageResponse};
use crate::api::Notifier;

/// Telegram Bot API client for delivering relay notifications
pub struct TelegramClient {
    http_client: HttpClient,
    bot_token: String,
    base_url: String,
}

impl TelegramClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.telegram.org";

    /// Create a new Bot API client
    pub fn new(bot_token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(bot_token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            base_url,
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                if let Ok(envelope) = serde_json::from_str::<SendMessageResponse>(&body_text) {
                    ApiError::BadRequest(envelope.description.unwrap_or(body_text))
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            429 => {
                let retry_after = serde_json::from_str::<SendMessageResponse>(&body_text)
                    .ok()
                    .and_then(|envelope| envelope.parameters)
                    .and_then(|p| p.retry_after)
                    .unwrap_or(1);
                warn!("Rate limited by Bot API, retry after {} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code as i32, body_text)
            }
            _ => ApiError::HttpError(status_code as i32, body_text),
        }
    }

    /// POST /bot{token}/sendMessage
    ///
    /// Delivers a plain-text message to a chat.
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat identifier from the manager registry
    /// * `text` - The formatted notification text
    ///
    /// # Returns
    /// * `Ok(SendMessageResponse)` - API confirmed delivery (`ok: true`)
    /// * `Err(ApiError)` - Transport failure, non-2xx status, or `ok: false`
    pub async fn send_message_raw(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<SendMessageResponse, ApiError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let body = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<SendMessageResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if !envelope.ok {
            return Err(ApiError::Rejected(
                envelope.description.clone().unwrap_or_default(),
            ));
        }

        Ok(envelope)
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> bool {
        match self.send_message_raw(chat_id, text).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Telegram delivery to chat {} failed: {}", chat_id, e);
                false
            }
        }
    }
}
