//! Response decoding and encoding.
//!
//! Text-mode backends reply with a TOML document containing exactly one
//! top-level section: the section name is the selection discriminant and the
//! section body is the field map. [`decode_response`] turns such a document
//! into a [`DecodedResponse`]; [`encode_response`] renders one back, which is
//! what a raw driver or a round-trip test needs.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError};

/// The raw parse of a backend reply, before validation.
///
/// Values carry the wire format's own primitive types mapped onto JSON values;
/// no schema-driven coercion has happened yet. A decoded response is consumed
/// immediately by the validator and never outlives the exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResponse {
    /// The single top-level section name.
    pub selection: String,
    /// The section's key/value pairs, in document order.
    pub data: IndexMap<String, Value>,
}

impl DecodedResponse {
    /// Create a decoded response from parts.
    pub fn new(selection: impl Into<String>, data: IndexMap<String, Value>) -> Self {
        Self {
            selection: selection.into(),
            data,
        }
    }
}

/// Decode a TOML document into a selection and field map.
///
/// Fails with [`DecodeError::Toml`] when the document does not parse, with
/// [`DecodeError::SelectionCount`] when it contains zero or more than one
/// top-level key, and with [`DecodeError::Malformed`] when the single
/// top-level key is not a section.
pub fn decode_response(document: &str) -> Result<DecodedResponse, DecodeError> {
    let table: toml::Table = document.parse()?;

    if table.len() != 1 {
        return Err(DecodeError::selection_count(table.len()));
    }

    let Some((selection, value)) = table.into_iter().next() else {
        return Err(DecodeError::selection_count(0));
    };

    let toml::Value::Table(fields) = value else {
        return Err(DecodeError::malformed(format!(
            "top-level key '{selection}' is not a section"
        )));
    };

    let mut data = IndexMap::with_capacity(fields.len());
    for (key, value) in fields {
        data.insert(key, toml_to_json(value)?);
    }

    Ok(DecodedResponse { selection, data })
}

/// Render a selection and field map as a single-section TOML document.
pub fn encode_response(
    selection: &str,
    data: &IndexMap<String, Value>,
) -> Result<String, EncodeError> {
    let mut fields = toml::Table::new();
    for (key, value) in data {
        fields.insert(key.clone(), json_to_toml(key, value)?);
    }

    let mut document = toml::Table::new();
    document.insert(selection.to_string(), toml::Value::Table(fields));

    Ok(toml::to_string(&document)?)
}

fn toml_to_json(value: toml::Value) -> Result<Value, DecodeError> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| DecodeError::malformed(format!("non-finite number {f}")))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => {
            let mut object = serde_json::Map::with_capacity(table.len());
            for (key, value) in table {
                object.insert(key, toml_to_json(value)?);
            }
            Value::Object(object)
        }
    })
}

fn json_to_toml(field: &str, value: &Value) -> Result<toml::Value, EncodeError> {
    Ok(match value {
        Value::Null => return Err(EncodeError::unrepresentable(field)),
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                toml::Value::Float(f)
            } else {
                return Err(EncodeError::unrepresentable(field));
            }
        }
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(items) => toml::Value::Array(
            items
                .iter()
                .map(|v| json_to_toml(field, v))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(object) => {
            let mut table = toml::Table::new();
            for (key, value) in object {
                table.insert(key.clone(), json_to_toml(key, value)?);
            }
            toml::Value::Table(table)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_single_section() {
        let decoded = decode_response("[todos]\ntasks = [\"a\", \"b\"]\n").unwrap();

        assert_eq!(decoded.selection, "todos");
        assert_eq!(decoded.data.len(), 1);
        assert_eq!(decoded.data["tasks"], json!(["a", "b"]));
    }

    #[test]
    fn test_decode_primitive_values() {
        let doc = "[answer]\ntext = \"hi\"\ncount = 3\nratio = 0.5\nok = true\n";
        let decoded = decode_response(doc).unwrap();

        assert_eq!(decoded.data["text"], json!("hi"));
        assert_eq!(decoded.data["count"], json!(3));
        assert_eq!(decoded.data["ratio"], json!(0.5));
        assert_eq!(decoded.data["ok"], json!(true));
    }

    #[test]
    fn test_decode_multiline_string() {
        let doc = "[answer]\ntext = \"\"\"\nline one\nline two\"\"\"\n";
        let decoded = decode_response(doc).unwrap();
        assert_eq!(decoded.data["text"], json!("line one\nline two"));
    }

    #[test]
    fn test_decode_preserves_key_order() {
        let doc = "[x]\nzeta = 1\nalpha = 2\nmid = 3\n";
        let decoded = decode_response(doc).unwrap();
        let keys: Vec<_> = decoded.data.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_decode_rejects_invalid_toml() {
        let err = decode_response("not [valid toml").unwrap_err();
        assert!(matches!(err, DecodeError::Toml(_)));
    }

    #[test]
    fn test_decode_rejects_empty_document() {
        let err = decode_response("").unwrap_err();
        assert!(matches!(err, DecodeError::SelectionCount { found: 0 }));
    }

    #[test]
    fn test_decode_rejects_two_sections() {
        let doc = "[one]\na = 1\n\n[two]\nb = 2\n";
        let err = decode_response(doc).unwrap_err();
        assert!(matches!(err, DecodeError::SelectionCount { found: 2 }));
    }

    #[test]
    fn test_decode_rejects_bare_top_level_key() {
        let err = decode_response("answer = \"yes\"\n").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_roundtrip() {
        let mut data = IndexMap::new();
        data.insert("tasks".to_string(), json!(["a", "b"]));
        data.insert("count".to_string(), json!(2));
        data.insert("urgent".to_string(), json!(false));
        data.insert("note".to_string(), json!("line one\nline two"));

        let document = encode_response("todos", &data).unwrap();
        let decoded = decode_response(&document).unwrap();

        assert_eq!(decoded.selection, "todos");
        assert_eq!(decoded.data, data);
    }

    #[test]
    fn test_encode_rejects_null() {
        let mut data = IndexMap::new();
        data.insert("missing".to_string(), Value::Null);

        let err = encode_response("x", &data).unwrap_err();
        assert!(matches!(err, EncodeError::Unrepresentable { .. }));
    }
}
