//! Error types for response decoding, encoding, and validation.

use thiserror::Error;

/// Error while decoding a backend reply into a selection and field map.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The reply is not a parseable TOML document.
    #[error("Malformed TOML document: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document parsed but does not have the required shape.
    #[error("Malformed response document: {0}")]
    Malformed(String),

    /// The document does not contain exactly one top-level section.
    #[error("Expected exactly one top-level section, found {found}")]
    SelectionCount {
        /// Number of top-level sections found.
        found: usize,
    },
}

impl DecodeError {
    /// Create a malformed-document error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a selection-count error.
    #[must_use]
    pub fn selection_count(found: usize) -> Self {
        Self::SelectionCount { found }
    }
}

/// Error while rendering a selection and field map back into a TOML document.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A value has no TOML representation (e.g. a JSON null).
    #[error("Value for '{field}' cannot be represented in TOML")]
    Unrepresentable {
        /// The offending field.
        field: String,
    },

    /// TOML serialization failed.
    #[error("TOML serialization failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl EncodeError {
    /// Create an unrepresentable-value error.
    pub fn unrepresentable(field: impl Into<String>) -> Self {
        Self::Unrepresentable {
            field: field.into(),
        }
    }
}

/// Error while validating a decoded response against an option set.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The decoded selection is not one of the declared options.
    #[error("Invalid selection: {selection} (possible options: {expected})")]
    UnknownSelection {
        /// The selection the reply claimed.
        selection: String,
        /// Comma-separated list of valid selection names.
        expected: String,
    },

    /// A declared field is absent from the reply.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field value does not match (and cannot be coerced to) its declared type.
    #[error("Invalid type for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The offending field.
        field: String,
        /// The declared type.
        expected: &'static str,
        /// A description of the value actually received.
        actual: String,
    },

    /// The reply contains a field not declared by the matched option.
    #[error("Extraneous field: {0}")]
    ExtraneousField(String),
}

impl ValidationError {
    /// Create an unknown-selection error from the claimed name and the
    /// declared selection names.
    pub fn unknown_selection<'a>(
        selection: impl Into<String>,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownSelection {
            selection: selection.into(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a type-mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual: actual.into(),
        }
    }

    /// Create an extraneous-field error.
    pub fn extraneous_field(field: impl Into<String>) -> Self {
        Self::ExtraneousField(field.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_count_message() {
        let err = DecodeError::selection_count(2);
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_unknown_selection_lists_options() {
        let err = ValidationError::unknown_selection("oops", ["todos", "refuse"]);
        let msg = err.to_string();
        assert!(msg.contains("oops"));
        assert!(msg.contains("todos, refuse"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ValidationError::type_mismatch("count", "number", "string");
        let msg = err.to_string();
        assert!(msg.contains("count"));
        assert!(msg.contains("expected number"));
        assert!(msg.contains("got string"));
    }
}
