//! Option schema types.
//!
//! This module provides the caller-facing description of what a backend may
//! reply with: an [`OptionSet`] of named [`ResponseOption`]s, each carrying an
//! ordered map of typed, described fields. The types are plain immutable data;
//! construction is builder-style and they are safe to share across any number
//! of concurrent exchanges.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The declared type of a response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A single-line string.
    String,
    /// A multi-line string.
    Multiline,
    /// A number (integer or float).
    Number,
    /// A boolean.
    Boolean,
    /// An array of strings.
    Array,
}

impl FieldType {
    /// The type hint rendered into the compiled prompt.
    #[must_use]
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            FieldType::String => "(single-line)",
            FieldType::Multiline => "(multiline)",
            FieldType::Number => "(number)",
            FieldType::Boolean => "(boolean)",
            FieldType::Array => "(array of strings)",
        }
    }

    /// The type name used in validation error messages.
    #[must_use]
    pub fn expected_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Multiline => "multiline string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array of strings",
        }
    }
}

/// A typed, described field within a response option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable description, rendered into the prompt.
    pub description: String,
}

impl FieldSpec {
    /// Create a field spec.
    pub fn new(field_type: FieldType, description: impl Into<String>) -> Self {
        Self {
            field_type,
            description: description.into(),
        }
    }

    /// A single-line string field.
    pub fn string(description: impl Into<String>) -> Self {
        Self::new(FieldType::String, description)
    }

    /// A multi-line string field.
    pub fn multiline(description: impl Into<String>) -> Self {
        Self::new(FieldType::Multiline, description)
    }

    /// A number field.
    pub fn number(description: impl Into<String>) -> Self {
        Self::new(FieldType::Number, description)
    }

    /// A boolean field.
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(FieldType::Boolean, description)
    }

    /// An array-of-strings field.
    pub fn array(description: impl Into<String>) -> Self {
        Self::new(FieldType::Array, description)
    }
}

/// One named response shape a backend may select.
///
/// Field insertion order is significant: it drives the rendering order in the
/// compiled prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOption {
    /// Unique name acting as the selection discriminant.
    pub selection: String,
    /// Optional description, rendered as a section header comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered map of field name to spec.
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

impl ResponseOption {
    /// Create an option with no fields.
    pub fn new(selection: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    /// Set the option description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a field. Later insertions with the same name replace earlier ones.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }
}

/// The ordered universe of valid selections for one exchange.
///
/// Selection names are expected to be unique within a set; lookups return the
/// first option with a matching name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: Vec<ResponseOption>,
}

impl OptionSet {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    #[must_use]
    pub fn with_option(mut self, option: ResponseOption) -> Self {
        self.options.push(option);
        self
    }

    /// Look up an option by selection name.
    #[must_use]
    pub fn get(&self, selection: &str) -> Option<&ResponseOption> {
        self.options.iter().find(|o| o.selection == selection)
    }

    /// The declared selection names, in order.
    pub fn selections(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.selection.as_str())
    }

    /// Iterate over the options in order.
    pub fn iter(&self) -> impl Iterator<Item = &ResponseOption> {
        self.options.iter()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the set has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl From<Vec<ResponseOption>> for OptionSet {
    fn from(options: Vec<ResponseOption>) -> Self {
        Self { options }
    }
}

impl FromIterator<ResponseOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = ResponseOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}
