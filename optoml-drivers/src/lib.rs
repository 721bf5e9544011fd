//! # optoml-drivers
//!
//! Backend drivers for optoml. A driver adapts one backend calling
//! convention behind the closed [`Driver`] enum:
//!
//! - [`TextDriver`]: returns free text for a rendered prompt
//! - [`RawDriver`]: returns an already-decoded selection + data map
//!
//! Shipped drivers:
//!
//! - [`OpenAiChatDriver`]: OpenAI chat completions (text mode), also
//!   reachable through the named registry (`gpt-3.5`, `gpt-3.5-16k`, `gpt-4`)
//! - [`MockTextDriver`] / [`MockRawDriver`]: scripted drivers for tests
//!
//! ## Example
//!
//! ```rust
//! use optoml_drivers::{driver_for_name, Driver};
//!
//! let driver = driver_for_name("gpt-4").unwrap();
//! assert!(matches!(driver, Driver::Text(_)));
//! assert!(driver_for_name("gpt-9000").is_err());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod driver;
pub mod error;
pub mod mock;
pub mod openai;

pub use driver::{Driver, RawDriver, TextDriver, TokenUsageCallback};
pub use error::DriverError;
pub use mock::{MockRawDriver, MockTextDriver};
pub use openai::OpenAiChatDriver;

/// Names accepted by [`driver_for_name`].
pub const KNOWN_DRIVERS: &[&str] = &["gpt-3.5", "gpt-3.5-16k", "gpt-4"];

/// Resolve a registered driver by name.
///
/// Fails with [`DriverError::UnknownDriver`] for unregistered names, listing
/// the known ones.
pub fn driver_for_name(name: &str) -> Result<Driver, DriverError> {
    match name {
        "gpt-3.5" => Ok(Driver::text(OpenAiChatDriver::gpt35())),
        "gpt-3.5-16k" => Ok(Driver::text(OpenAiChatDriver::gpt35_16k())),
        "gpt-4" => Ok(Driver::text(OpenAiChatDriver::gpt4())),
        other => Err(DriverError::unknown_driver(other, KNOWN_DRIVERS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_for_name_resolves_known() {
        for name in KNOWN_DRIVERS {
            assert!(driver_for_name(name).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn test_driver_for_name_rejects_unknown() {
        let err = driver_for_name("claude-2").unwrap_err();
        assert!(matches!(err, DriverError::UnknownDriver { .. }));
        assert!(err.to_string().contains("gpt-3.5-16k"));
    }
}
