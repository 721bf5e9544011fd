//! Validation and coercion of decoded responses.
//!
//! The validator enforces the strict closed schema contract: the decoded
//! selection must name a declared option, every declared field must be
//! present with (or be coercible to) its declared type, and no undeclared
//! field may appear. Backends are sloppy about primitive types, so numbers
//! and booleans accept their literal string forms and are rewritten in place.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ValidationError;
use crate::parser::DecodedResponse;
use crate::spec::{FieldType, OptionSet};

/// A decoded response that conforms to its matched option.
///
/// Every declared field is present in `data` with a value of the declared
/// semantic type, and no undeclared key exists. This is the sole authoritative
/// copy of the data after validation; coerced values have been rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResponse {
    /// The selected option name.
    pub selection: String,
    /// The conforming field map, in document order.
    pub data: IndexMap<String, Value>,
}

/// Validate a decoded response against an option set.
///
/// Consumes the decoded response; the returned [`ValidatedResponse`] carries
/// the (possibly coerced) data map.
pub fn validate_response(
    decoded: DecodedResponse,
    options: &OptionSet,
) -> Result<ValidatedResponse, ValidationError> {
    let DecodedResponse {
        selection,
        mut data,
    } = decoded;

    tracing::trace!(selection = %selection, fields = data.len(), "validating decoded response");

    let Some(option) = options.get(&selection) else {
        return Err(ValidationError::unknown_selection(
            selection,
            options.selections(),
        ));
    };

    for (name, spec) in &option.fields {
        let Some(value) = data.get(name) else {
            return Err(ValidationError::missing_field(name));
        };
        if let Some(coerced) = coerce(spec.field_type, name, value)? {
            data.insert(name.clone(), coerced);
        }
    }

    if let Some(extra) = data.keys().find(|key| !option.fields.contains_key(*key)) {
        return Err(ValidationError::extraneous_field(extra));
    }

    Ok(ValidatedResponse { selection, data })
}

/// Check a value against a declared type.
///
/// Returns `Ok(None)` when the value already conforms, `Ok(Some(v))` with the
/// replacement when a coercion applied, and a [`ValidationError::TypeMismatch`]
/// otherwise.
fn coerce(
    field_type: FieldType,
    field: &str,
    value: &Value,
) -> Result<Option<Value>, ValidationError> {
    let mismatch =
        || ValidationError::type_mismatch(field, field_type.expected_name(), type_name(value));

    match field_type {
        FieldType::String | FieldType::Multiline => {
            if value.is_string() {
                Ok(None)
            } else {
                Err(mismatch())
            }
        }
        FieldType::Number => match value {
            Value::Number(_) => Ok(None),
            Value::String(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Ok(Some(Value::Number(i.into())))
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    serde_json::Number::from_f64(f)
                        .map(|n| Some(Value::Number(n)))
                        .ok_or_else(mismatch)
                } else {
                    Err(mismatch())
                }
            }
            _ => Err(mismatch()),
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(None),
            // Only the literal forms; "yes", "True" etc. are mismatches.
            Value::String(s) if s == "true" => Ok(Some(Value::Bool(true))),
            Value::String(s) if s == "false" => Ok(Some(Value::Bool(false))),
            _ => Err(mismatch()),
        },
        FieldType::Array => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => Ok(None),
            _ => Err(mismatch()),
        },
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode_response;
    use crate::spec::{FieldSpec, ResponseOption};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn todos_options() -> OptionSet {
        OptionSet::new().with_option(
            ResponseOption::new("todos")
                .with_field("tasks", FieldSpec::array("the tasks to complete")),
        )
    }

    fn decoded(selection: &str, pairs: &[(&str, Value)]) -> DecodedResponse {
        let data = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        DecodedResponse::new(selection, data)
    }

    #[test]
    fn test_conforming_response_passes_unchanged() {
        let document = "[todos]\ntasks = [\"a\", \"b\"]\n";
        let parsed = decode_response(document).unwrap();
        let validated = validate_response(parsed, &todos_options()).unwrap();

        assert_eq!(validated.selection, "todos");
        assert_eq!(validated.data["tasks"], json!(["a", "b"]));
    }

    #[test]
    fn test_unknown_selection() {
        let result = validate_response(decoded("unknown", &[]), &todos_options());
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::UnknownSelection { .. }
        ));
    }

    #[test]
    fn test_missing_field() {
        let result = validate_response(decoded("todos", &[]), &todos_options());
        let err = result.unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "tasks"));
    }

    #[test]
    fn test_extraneous_field_even_when_declared_fields_valid() {
        let input = decoded(
            "todos",
            &[("tasks", json!(["a"])), ("extra", json!("surprise"))],
        );
        let err = validate_response(input, &todos_options()).unwrap_err();
        assert!(matches!(err, ValidationError::ExtraneousField(ref f) if f == "extra"));
    }

    #[test]
    fn test_string_where_array_expected() {
        let input = decoded("todos", &[("tasks", json!("a"))]);
        let err = validate_response(input, &todos_options()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { ref field, .. } if field == "tasks"
        ));
    }

    #[test]
    fn test_array_with_non_string_element() {
        let input = decoded("todos", &[("tasks", json!(["a", 1]))]);
        let err = validate_response(input, &todos_options()).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    }

    fn single_field_options(field_type: FieldType) -> OptionSet {
        OptionSet::new().with_option(
            ResponseOption::new("only")
                .with_field("value", FieldSpec::new(field_type, "the value")),
        )
    }

    #[rstest]
    #[case::native_int(FieldType::Number, json!(42), json!(42))]
    #[case::native_float(FieldType::Number, json!(0.5), json!(0.5))]
    #[case::int_string(FieldType::Number, json!("42"), json!(42))]
    #[case::float_string(FieldType::Number, json!("2.5"), json!(2.5))]
    #[case::padded_string(FieldType::Number, json!(" 7 "), json!(7))]
    #[case::native_bool(FieldType::Boolean, json!(true), json!(true))]
    #[case::true_string(FieldType::Boolean, json!("true"), json!(true))]
    #[case::false_string(FieldType::Boolean, json!("false"), json!(false))]
    fn test_coercion(
        #[case] field_type: FieldType,
        #[case] input: Value,
        #[case] expected: Value,
    ) {
        let options = single_field_options(field_type);
        let validated = validate_response(decoded("only", &[("value", input)]), &options).unwrap();
        assert_eq!(validated.data["value"], expected);
    }

    #[rstest]
    #[case::not_a_number(FieldType::Number, json!("forty-two"))]
    #[case::empty_string(FieldType::Number, json!(""))]
    #[case::bool_for_number(FieldType::Number, json!(true))]
    #[case::table_for_number(FieldType::Number, json!({"nested": 1}))]
    #[case::yes_string(FieldType::Boolean, json!("yes"))]
    #[case::capitalized(FieldType::Boolean, json!("True"))]
    #[case::number_for_bool(FieldType::Boolean, json!(1))]
    #[case::table_for_bool(FieldType::Boolean, json!({"nested": true}))]
    #[case::number_for_string(FieldType::String, json!(3))]
    #[case::array_for_multiline(FieldType::Multiline, json!(["a"]))]
    fn test_type_mismatch(#[case] field_type: FieldType, #[case] input: Value) {
        let options = single_field_options(field_type);
        let err = validate_response(decoded("only", &[("value", input)]), &options).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let options = single_field_options(FieldType::Number);

        let first =
            validate_response(decoded("only", &[("value", json!("42"))]), &options).unwrap();
        assert_eq!(first.data["value"], json!(42));

        // Feeding the already-coerced value back through leaves it unchanged.
        let second = validate_response(
            DecodedResponse::new("only", first.data.clone()),
            &options,
        )
        .unwrap();
        assert_eq!(second.data, first.data);
    }

    #[test]
    fn test_multiple_fields_and_order_preserved() {
        let options = OptionSet::new().with_option(
            ResponseOption::new("report")
                .with_field("title", FieldSpec::string("the title"))
                .with_field("body", FieldSpec::multiline("the body"))
                .with_field("score", FieldSpec::number("a score")),
        );

        let input = decoded(
            "report",
            &[
                ("title", json!("weekly")),
                ("body", json!("line one\nline two")),
                ("score", json!("9")),
            ],
        );

        let validated = validate_response(input, &options).unwrap();
        let keys: Vec<_> = validated.data.keys().collect();
        assert_eq!(keys, vec!["title", "body", "score"]);
        assert_eq!(validated.data["score"], json!(9));
    }
}
