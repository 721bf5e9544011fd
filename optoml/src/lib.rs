//! # optoml
//!
//! Schema-conformant structured output from text-completion LLMs.
//!
//! optoml lets you describe a closed set of named response **options**, each
//! with typed, described fields, and get back exactly one selected option
//! with a validated, type-coerced field map — even from a backend that can
//! only reply with free text. The wire format is a single-section TOML
//! document, chosen because models produce it reliably and it parses
//! unambiguously.
//!
//! ## Quick Start
//!
//! ```ignore
//! use optoml::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::for_model("gpt-4")?
//!         .with_api_key(std::env::var("OPENAI_API_KEY")?);
//!
//!     let options = OptionSet::new().with_option(
//!         ResponseOption::new("todos")
//!             .with_field("tasks", FieldSpec::array("the tasks to complete")),
//!     );
//!
//!     let result = client
//!         .send_simple(
//!             "Break the task the user passes in down to a series of steps.",
//!             "Make a todo list app",
//!             &options,
//!             ExchangeSettings::new().max_tokens(1024),
//!         )
//!         .await?;
//!
//!     println!("{}: {:?}", result.selection, result.data["tasks"]);
//!     Ok(())
//! }
//! ```
//!
//! ## How an exchange works
//!
//! 1. The option set is compiled into a deterministic TOML instruction block
//!    and appended to the conversation as a trailing system message
//!    (text-mode drivers only).
//! 2. The driver makes one backend call.
//! 3. The reply is decoded into exactly one selection plus a field map.
//! 4. The validator enforces the strict closed schema: unknown selections,
//!    missing fields, type mismatches, and extraneous fields all fail the
//!    exchange; numeric and boolean string forms are coerced in place.
//!
//! Raw-mode drivers skip steps 1 and 3 but never step 4.
//!
//! ## Architecture
//!
//! - [`optoml_core`] — messages, settings, usage types
//! - [`optoml_schema`] — schema model, prompt compiler, decoder, validator
//! - [`optoml_drivers`] — the driver contract and implementations
//! - this crate — the [`Client`] orchestrator and exchange events

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod client;
pub mod error;
pub mod events;

pub use client::Client;
pub use error::{ExchangeError, Result};
pub use events::{EventCallback, ExchangeEvent};

pub use optoml_core::{ChatMessage, ExchangeSettings, Role, TokenUsage};
pub use optoml_drivers::{
    driver_for_name, Driver, DriverError, MockRawDriver, MockTextDriver, OpenAiChatDriver,
    RawDriver, TextDriver, TokenUsageCallback, KNOWN_DRIVERS,
};
pub use optoml_schema::{
    compile_prompt, decode_response, encode_response, validate_response, DecodeError,
    DecodedResponse, EncodeError, FieldSpec, FieldType, OptionSet, ResponseOption,
    ValidatedResponse, ValidationError,
};

/// Prelude module for common imports.
///
/// ```rust
/// use optoml::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::error::{ExchangeError, Result};
    pub use crate::events::ExchangeEvent;
    pub use optoml_core::{ChatMessage, ExchangeSettings, Role, TokenUsage};
    pub use optoml_drivers::{driver_for_name, Driver, DriverError, OpenAiChatDriver};
    pub use optoml_schema::{
        FieldSpec, FieldType, OptionSet, ResponseOption, ValidatedResponse,
    };
}
