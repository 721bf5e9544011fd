//! Per-exchange settings.
//!
//! This module provides [`ExchangeSettings`], the optional knobs a caller can
//! set for a single exchange. Every field is optional; backend-specific
//! defaults apply when a field is left unset.

use serde::{Deserialize, Serialize};

/// Settings for one exchange with a backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Cap on the completion length, in tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Backend model identifier overriding the driver's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_override: Option<String>,

    /// Authentication token for the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ExchangeSettings {
    /// Create new empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the completion length cap.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Override the driver's default model.
    #[must_use]
    pub fn model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Set the backend credential.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Merge with another settings, preferring values from `other`.
    ///
    /// Values in `other` override values in `self` when both are present.
    #[must_use]
    pub fn merge(&self, other: &ExchangeSettings) -> ExchangeSettings {
        ExchangeSettings {
            temperature: other.temperature.or(self.temperature),
            max_tokens: other.max_tokens.or(self.max_tokens),
            model_override: other
                .model_override
                .clone()
                .or_else(|| self.model_override.clone()),
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
        }
    }

    /// Check if all settings are unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.max_tokens.is_none()
            && self.model_override.is_none()
            && self.api_key.is_none()
    }
}
