//! Driver error types.

use thiserror::Error;

/// Error raised by a backend driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The requested named driver is not registered.
    #[error("Unknown driver: {name} (known drivers: {known})")]
    UnknownDriver {
        /// The name that was requested.
        name: String,
        /// Comma-separated list of registered driver names.
        known: String,
    },

    /// The backend rejected the credential.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// No credential was supplied for a backend that requires one.
    #[error("API key is required")]
    MissingApiKey,

    /// The backend returned a structured API error.
    #[error("API error: {message}")]
    Api {
        /// Error message from the backend.
        message: String,
        /// Backend-specific error code.
        code: Option<String>,
    },

    /// The backend returned a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        body: String,
    },

    /// The backend reply could not be interpreted.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// A network-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl DriverError {
    /// Create an unknown-driver error listing the registered names.
    pub fn unknown_driver(name: impl Into<String>, known: &[&str]) -> Self {
        Self::UnknownDriver {
            name: name.into(),
            known: known.join(", "),
        }
    }

    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
