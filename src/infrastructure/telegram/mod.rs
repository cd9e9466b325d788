pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::error::{AppError, Result};
use types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, Update, User};

/// Transport seam for the Bot API, so the dispatcher can run against a
/// fake in tests.
#[async_trait]
pub trait BotApi {
    /// The bot's own identity, used for mention and command addressing.
    async fn get_me(&self) -> Result<User>;
    /// Long-polls for updates with ids greater than or equal to `offset`.
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>>;
    async fn send_message(&self, request: &SendMessageRequest) -> Result<()>;
}

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    // Must sit above the long-poll timeout or getUpdates would be cut off
    // mid-wait.
    const HTTP_TIMEOUT_SECS: u64 = 90;

    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(Self::HTTP_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T, B>(&self, method: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Telegram(format!("{} request failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Telegram(format!(
                "{} error ({}): {}",
                method, status, text
            )));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Telegram(format!("{}: failed to parse JSON: {}", method, e)))?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(AppError::Telegram(format!("{}: {}", method, description)));
        }
        envelope
            .result
            .ok_or_else(|| AppError::Telegram(format!("{}: empty result", method)))
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message"],
        };
        self.call("getUpdates", &request).await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<()> {
        // The API echoes the sent message back; nothing in it is needed.
        let _echo: serde_json::Value = self.call("sendMessage", request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramClient::new("https://api.telegram.org/", "123:abc");
        assert_eq!(
            client.method_url("getMe"),
            "https://api.telegram.org/bot123:abc/getMe"
        );
    }
}
