//! # optoml-core
//!
//! Foundational types for the optoml structured-output protocol:
//!
//! - **Messages**: conversation messages with system/user/assistant roles
//! - **Settings**: per-exchange configuration (temperature, token caps, keys)
//! - **Usage**: token usage reporting for observers
//!
//! ## Example
//!
//! ```rust
//! use optoml_core::{ChatMessage, ExchangeSettings};
//!
//! let conversation = vec![
//!     ChatMessage::system("Break the task down into steps."),
//!     ChatMessage::user("Make a todo list app"),
//! ];
//!
//! let settings = ExchangeSettings::new().max_tokens(1024).temperature(0.7);
//! assert_eq!(conversation.len(), 2);
//! assert!(!settings.is_empty());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod messages;
pub mod settings;
pub mod usage;

pub use messages::{ChatMessage, Role};
pub use settings::ExchangeSettings;
pub use usage::TokenUsage;
