//! # optoml-schema
//!
//! The structured-output protocol at the heart of optoml:
//!
//! - **Schema model**: named response options with typed, described fields
//! - **Prompt compiler**: deterministic TOML instruction blocks
//! - **Response decoder**: one-section TOML documents into selection + data
//! - **Validator**: strict closed-schema type checking with best-effort
//!   coercion of loosely-typed model output
//!
//! ## Example
//!
//! ```rust
//! use optoml_schema::{
//!     compile_prompt, decode_response, validate_response,
//!     FieldSpec, OptionSet, ResponseOption,
//! };
//!
//! let options = OptionSet::new().with_option(
//!     ResponseOption::new("todos")
//!         .with_field("tasks", FieldSpec::array("the tasks to complete")),
//! );
//!
//! let prompt = compile_prompt(&options);
//! assert!(prompt.contains("[todos]"));
//!
//! // A well-behaved model reply:
//! let decoded = decode_response("[todos]\ntasks = [\"a\", \"b\"]\n").unwrap();
//! let validated = validate_response(decoded, &options).unwrap();
//! assert_eq!(validated.selection, "todos");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod parser;
pub mod prompt;
pub mod spec;
pub mod validator;

pub use error::{DecodeError, EncodeError, ValidationError};
pub use parser::{decode_response, encode_response, DecodedResponse};
pub use prompt::compile_prompt;
pub use spec::{FieldSpec, FieldType, OptionSet, ResponseOption};
pub use validator::{validate_response, ValidatedResponse};
