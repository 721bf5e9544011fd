//! Mock drivers for testing.
//!
//! [`MockTextDriver`] and [`MockRawDriver`] return scripted responses in
//! order and record the conversations they were sent, so tests can assert
//! both on results and on what reached the backend.
//!
//! ```rust
//! use optoml_drivers::MockTextDriver;
//!
//! let driver = MockTextDriver::new()
//!     .with_reply("[todos]\ntasks = [\"a\"]\n");
//! ```

use async_trait::async_trait;
use optoml_core::{ChatMessage, ExchangeSettings, TokenUsage};
use optoml_schema::{DecodedResponse, OptionSet};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::driver::{RawDriver, TextDriver, TokenUsageCallback};
use crate::error::DriverError;

/// A text-mode driver with scripted string replies.
#[derive(Clone, Default)]
pub struct MockTextDriver {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    settings: Arc<Mutex<Vec<ExchangeSettings>>>,
    usage: Option<TokenUsage>,
    callbacks: Arc<RwLock<Vec<TokenUsageCallback>>>,
}

impl MockTextDriver {
    /// Create a mock with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply to return.
    #[must_use]
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().push_back(reply.into());
        self
    }

    /// Report this usage to observers after every reply.
    #[must_use]
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// The conversations sent so far.
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().clone()
    }

    /// The per-call settings seen so far.
    #[must_use]
    pub fn recorded_settings(&self) -> Vec<ExchangeSettings> {
        self.settings.lock().clone()
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    fn name(&self) -> &str {
        "mock-text"
    }

    async fn send(
        &self,
        messages: &[ChatMessage],
        settings: &ExchangeSettings,
    ) -> Result<String, DriverError> {
        self.requests.lock().push(messages.to_vec());
        self.settings.lock().push(settings.clone());

        let reply = self
            .replies
            .lock()
            .pop_front()
            .ok_or_else(|| DriverError::invalid_response("mock driver has no replies left"))?;

        if let Some(usage) = self.usage {
            for callback in self.callbacks.read().iter() {
                callback(usage);
            }
        }

        Ok(reply)
    }

    fn on_token_use(&self, callback: TokenUsageCallback) {
        self.callbacks.write().push(callback);
    }
}

/// A raw-mode driver with scripted decoded responses.
#[derive(Clone, Default)]
pub struct MockRawDriver {
    responses: Arc<Mutex<VecDeque<DecodedResponse>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    usage: Option<TokenUsage>,
    callbacks: Arc<RwLock<Vec<TokenUsageCallback>>>,
}

impl MockRawDriver {
    /// Create a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a decoded response to return.
    #[must_use]
    pub fn with_response(self, response: DecodedResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Report this usage to observers after every reply.
    #[must_use]
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// The conversations sent so far.
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RawDriver for MockRawDriver {
    fn name(&self) -> &str {
        "mock-raw"
    }

    async fn send(
        &self,
        messages: &[ChatMessage],
        _options: &OptionSet,
        _settings: &ExchangeSettings,
    ) -> Result<DecodedResponse, DriverError> {
        self.requests.lock().push(messages.to_vec());

        let response = self
            .responses
            .lock()
            .pop_front()
            .ok_or_else(|| DriverError::invalid_response("mock driver has no responses left"))?;

        if let Some(usage) = self.usage {
            for callback in self.callbacks.read().iter() {
                callback(usage);
            }
        }

        Ok(response)
    }

    fn on_token_use(&self, callback: TokenUsageCallback) {
        self.callbacks.write().push(callback);
    }
}
