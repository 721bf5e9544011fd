//! OpenAI chat-completions text driver.

use async_trait::async_trait;
use optoml_core::{ChatMessage, ExchangeSettings, TokenUsage};
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::driver::{TextDriver, TokenUsageCallback};
use crate::error::DriverError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MAX_TOKENS: u64 = 500;
const DEFAULT_TEMPERATURE: f64 = 1.0;

/// A text-mode driver backed by the OpenAI chat completions API.
///
/// The completion is returned as-is; the orchestrator is responsible for
/// decoding it. Token usage reported by the API is forwarded to registered
/// observers after each reply.
#[derive(Clone)]
pub struct OpenAiChatDriver {
    default_model: String,
    client: Client,
    base_url: String,
    timeout: Duration,
    callbacks: Arc<RwLock<Vec<TokenUsageCallback>>>,
}

impl OpenAiChatDriver {
    /// Create a driver with the given default model.
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            callbacks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Driver for `gpt-3.5-turbo`.
    #[must_use]
    pub fn gpt35() -> Self {
        Self::new("gpt-3.5-turbo")
    }

    /// Driver for `gpt-3.5-turbo-16k`.
    #[must_use]
    pub fn gpt35_16k() -> Self {
        Self::new("gpt-3.5-turbo-16k")
    }

    /// Driver for `gpt-4`.
    #[must_use]
    pub fn gpt4() -> Self {
        Self::new("gpt-4")
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn notify_usage(&self, usage: TokenUsage) {
        for callback in self.callbacks.read().iter() {
            callback(usage);
        }
    }

    fn handle_error_response(&self, status: u16, body: &str) -> DriverError {
        if let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) {
            if status == 401 {
                return DriverError::auth(err.error.message);
            }
            return DriverError::Api {
                message: err.error.message,
                code: err.error.code,
            };
        }

        DriverError::http(status, body)
    }
}

#[async_trait]
impl TextDriver for OpenAiChatDriver {
    fn name(&self) -> &str {
        &self.default_model
    }

    async fn send(
        &self,
        messages: &[ChatMessage],
        settings: &ExchangeSettings,
    ) -> Result<String, DriverError> {
        let api_key = settings.api_key.as_deref().ok_or(DriverError::MissingApiKey)?;
        let model = settings
            .model_override
            .as_deref()
            .unwrap_or(&self.default_model);

        let body = ChatCompletionRequest {
            model,
            messages,
            max_tokens: settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: settings.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        tracing::debug!(model, messages = messages.len(), "sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body));
        }

        let resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DriverError::invalid_response(e.to_string()))?;

        if let Some(usage) = resp.usage {
            self.notify_usage(TokenUsage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DriverError::invalid_response("no completion choices in response"))
    }

    fn on_token_use(&self, callback: TokenUsageCallback) {
        self.callbacks.write().push(callback);
    }

    async fn test_credential(&self, api_key: &str) -> Result<(), DriverError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            if status == 401 {
                return Err(DriverError::auth("invalid API key"));
            }
            let body = response.text().await.unwrap_or_default();
            return Err(DriverError::http(status, body));
        }

        Ok(())
    }
}

impl std::fmt::Debug for OpenAiChatDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatDriver")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u64,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}
