//! The top-level exchange error.

use optoml_drivers::DriverError;
use optoml_schema::{DecodeError, ValidationError};
use thiserror::Error;

/// Any failure terminating an exchange.
///
/// Every failure surfaces synchronously to the caller as a distinct
/// condition; nothing is retried or defaulted internally, and no partial
/// result is returned. Retrying the whole exchange is the caller's call.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The backend driver failed (unknown driver, auth, network, transport).
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The backend reply could not be decoded into a single selection.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The decoded reply does not conform to the option schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for exchanges.
pub type Result<T> = std::result::Result<T, ExchangeError>;
