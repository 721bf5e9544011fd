//! The exchange orchestrator.

use optoml_core::{ChatMessage, ExchangeSettings};
use optoml_drivers::{driver_for_name, Driver};
use optoml_schema::{compile_prompt, decode_response, validate_response, OptionSet, ValidatedResponse};
use std::sync::Arc;

use crate::error::Result;
use crate::events::{EventCallback, EventRegistry, ExchangeEvent};

/// Orchestrates exchanges against one configured driver.
///
/// An exchange is strictly sequential: compile (text mode only) → one
/// outstanding backend call → decode → validate. The client holds no mutable
/// exchange state, so one `Client` can serve any number of concurrent
/// exchanges.
pub struct Client {
    driver: Driver,
    api_key: Option<String>,
    events: Arc<EventRegistry>,
}

impl Client {
    /// Create a client over a driver.
    #[must_use]
    pub fn new(driver: Driver) -> Self {
        let events = Arc::new(EventRegistry::default());

        // Forward driver-level usage reports to this client's observers.
        let sink = events.clone();
        driver.on_token_use(Arc::new(move |usage| sink.emit_usage(usage)));

        Self {
            driver,
            api_key: None,
            events,
        }
    }

    /// Create a client from a registered driver name (`gpt-3.5`,
    /// `gpt-3.5-16k`, `gpt-4`).
    pub fn for_model(name: &str) -> Result<Self> {
        Ok(Self::new(driver_for_name(name)?))
    }

    /// Set the backend credential.
    ///
    /// A key set here takes precedence over one supplied in per-call
    /// settings.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The configured driver's identifier.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        self.driver.name()
    }

    /// Register an exchange-event observer.
    pub fn on_event(&self, callback: EventCallback) {
        self.events.on_event(callback);
    }

    /// Register a token-usage observer.
    pub fn on_token_use(&self, callback: optoml_drivers::TokenUsageCallback) {
        self.events.on_token_use(callback);
    }

    /// Probe the backend with the configured credential.
    pub async fn test_credential(&self) -> Result<()> {
        self.driver
            .test_credential(self.api_key.as_deref().unwrap_or(""))
            .await?;
        Ok(())
    }

    /// Run one exchange: send the conversation, constrain the reply to the
    /// option set, and return the validated selection + data map.
    ///
    /// Text-mode drivers get the compiled instruction block appended as a
    /// trailing system message and their free-text reply is decoded; raw-mode
    /// drivers receive the option set directly. Validation runs in both
    /// modes — no driver bypasses the schema contract.
    pub async fn send(
        &self,
        messages: &[ChatMessage],
        options: &OptionSet,
        settings: ExchangeSettings,
    ) -> Result<ValidatedResponse> {
        let mut settings = settings;
        if let Some(key) = &self.api_key {
            settings.api_key = Some(key.clone());
        }

        let decoded = match &self.driver {
            Driver::Text(driver) => {
                let prompt = compile_prompt(options);

                let mut conversation = messages.to_vec();
                conversation.push(ChatMessage::system(prompt.clone()));

                tracing::debug!(
                    driver = self.driver.name(),
                    options = options.len(),
                    "sending text-mode exchange"
                );
                self.events.emit(&ExchangeEvent::PromptSent(prompt));

                let reply = driver.send(&conversation, &settings).await?;

                self.events.emit(&ExchangeEvent::ResponseReceived(reply.clone()));

                decode_response(&reply)?
            }
            Driver::Raw(driver) => {
                tracing::debug!(
                    driver = self.driver.name(),
                    options = options.len(),
                    "sending raw-mode exchange"
                );
                driver.send(messages, options, &settings).await?
            }
        };

        Ok(validate_response(decoded, options)?)
    }

    /// Run one exchange from a system/user message pair.
    pub async fn send_simple(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
        options: &OptionSet,
        settings: ExchangeSettings,
    ) -> Result<ValidatedResponse> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.send(&messages, options, settings).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("driver", &self.driver)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
