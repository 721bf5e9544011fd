//! The driver contract.
//!
//! A driver adapts one backend calling convention. There are exactly two:
//!
//! - **Text**: the driver returns a free-text completion for a rendered
//!   prompt; the orchestrator decodes and validates it.
//! - **Raw**: the driver accepts the option set directly and returns an
//!   already-decoded selection + data map; the orchestrator still validates.
//!
//! The two conventions are incompatible, so they live behind the closed
//! [`Driver`] enum and the orchestrator dispatches on the variant explicitly.

use async_trait::async_trait;
use optoml_core::{ChatMessage, ExchangeSettings, TokenUsage};
use optoml_schema::{DecodedResponse, OptionSet};
use std::sync::Arc;

use crate::error::DriverError;

/// Callback invoked with token usage after a backend reply.
pub type TokenUsageCallback = Arc<dyn Fn(TokenUsage) + Send + Sync>;

/// A backend returning unstructured text for a rendered prompt.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// A short identifier for logs and errors.
    fn name(&self) -> &str;

    /// Send the conversation and return the raw completion text.
    async fn send(
        &self,
        messages: &[ChatMessage],
        settings: &ExchangeSettings,
    ) -> Result<String, DriverError>;

    /// Register a token-usage observer.
    ///
    /// Drivers without usage information may leave the default no-op.
    fn on_token_use(&self, _callback: TokenUsageCallback) {}

    /// Probe whether a credential is accepted by the backend.
    ///
    /// Drivers without a cheap probe may leave the default, which accepts
    /// any credential.
    async fn test_credential(&self, _api_key: &str) -> Result<(), DriverError> {
        Ok(())
    }
}

/// A backend that produces an already-decoded selection + data map.
#[async_trait]
pub trait RawDriver: Send + Sync {
    /// A short identifier for logs and errors.
    fn name(&self) -> &str;

    /// Send the conversation and option set, returning a decoded response.
    async fn send(
        &self,
        messages: &[ChatMessage],
        options: &OptionSet,
        settings: &ExchangeSettings,
    ) -> Result<DecodedResponse, DriverError>;

    /// Register a token-usage observer.
    fn on_token_use(&self, _callback: TokenUsageCallback) {}

    /// Probe whether a credential is accepted by the backend.
    async fn test_credential(&self, _api_key: &str) -> Result<(), DriverError> {
        Ok(())
    }
}

/// The closed set of driver calling conventions.
#[derive(Clone)]
pub enum Driver {
    /// A text-mode driver; replies are decoded by the orchestrator.
    Text(Arc<dyn TextDriver>),
    /// A raw-mode driver; replies arrive already decoded.
    Raw(Arc<dyn RawDriver>),
}

impl Driver {
    /// Wrap a text driver.
    pub fn text(driver: impl TextDriver + 'static) -> Self {
        Driver::Text(Arc::new(driver))
    }

    /// Wrap a raw driver.
    pub fn raw(driver: impl RawDriver + 'static) -> Self {
        Driver::Raw(Arc::new(driver))
    }

    /// The driver's identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Driver::Text(d) => d.name(),
            Driver::Raw(d) => d.name(),
        }
    }

    /// Register a token-usage observer with the underlying driver.
    pub fn on_token_use(&self, callback: TokenUsageCallback) {
        match self {
            Driver::Text(d) => d.on_token_use(callback),
            Driver::Raw(d) => d.on_token_use(callback),
        }
    }

    /// Probe the backend with a credential.
    pub async fn test_credential(&self, api_key: &str) -> Result<(), DriverError> {
        match self {
            Driver::Text(d) => d.test_credential(api_key).await,
            Driver::Raw(d) => d.test_credential(api_key).await,
        }
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::Text(d) => f.debug_tuple("Text").field(&d.name()).finish(),
            Driver::Raw(d) => f.debug_tuple("Raw").field(&d.name()).finish(),
        }
    }
}
