use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::FieldType;

/// Aggregate config of one action: field name to value.
pub type ConfigMap = Map<String, Value>;

const DATETIME_LOCAL_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Presence state of one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePresence {
    /// The config has no entry for the field.
    Absent,
    /// The entry exists but carries nothing a user entered.
    Empty,
    /// The entry carries a value.
    Present,
}

impl ValuePresence {
    /// Classifies `value` for a field of `field_type`.
    ///
    /// `0` counts as present. An unticked checkbox counts as empty.
    #[must_use]
    pub fn of(field_type: FieldType, value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Absent;
        };

        let is_empty = match value {
            Value::Null => true,
            Value::Bool(checked) => field_type == FieldType::Checkbox && !checked,
            Value::Number(_) => false,
            Value::String(text) => text.trim().is_empty(),
            Value::Array(items) if field_type == FieldType::Keyvalue => {
                items.iter().all(|item| {
                    KeyValuePair::from_value(item).is_some_and(|pair| pair.is_blank())
                })
            }
            Value::Array(items) => items.is_empty(),
            Value::Object(object) => object.is_empty(),
        };

        if is_empty { Self::Empty } else { Self::Present }
    }

    /// Returns whether a value was supplied.
    #[must_use]
    pub fn is_present(self) -> bool {
        self == Self::Present
    }
}

/// One editable row of a key/value field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// Pair key.
    pub key: String,
    /// Pair value.
    pub value: String,
}

impl KeyValuePair {
    /// Creates a pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns whether both sides are empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }

    fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Parses a key/value list, `None` when the shape does not match.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Serializes a key/value list.
    #[must_use]
    pub fn list_to_value(pairs: &[Self]) -> Value {
        Value::Array(
            pairs
                .iter()
                .map(|pair| {
                    let mut object = Map::new();
                    object.insert("key".to_owned(), Value::String(pair.key.clone()));
                    object.insert("value".to_owned(), Value::String(pair.value.clone()));
                    Value::Object(object)
                })
                .collect(),
        )
    }
}

/// File metadata held in the config. No binary content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl FileDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Parses a descriptor list, `None` when the shape does not match.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Serializes a descriptor list.
    #[must_use]
    pub fn list_to_value(files: &[Self]) -> Value {
        serde_json::to_value(files).unwrap_or_else(|_| Value::Array(Vec::new()))
    }
}

/// Coerces raw number input to a JSON number, or `null` when empty or not numeric.
#[must_use]
pub fn coerce_number_input(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(Number::from(integer));
    }

    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Returns the measured length of a value: characters for strings, items for arrays.
#[must_use]
pub fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Returns whether `value` reads as set, in the loose sense form predicates use.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns whether `value` is an ISO local date-time string.
#[must_use]
pub fn is_datetime_local(value: &str) -> bool {
    DATETIME_LOCAL_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

/// Returns whether `value` has the shape a field of `field_type` stores.
#[must_use]
pub fn matches_field_type(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Richtext
        | FieldType::Dropdown
        | FieldType::Radio
        | FieldType::Token => value.is_string(),
        FieldType::Datetime => value.as_str().is_some_and(is_datetime_local),
        FieldType::Number => value.is_number(),
        FieldType::Checkbox => value.is_boolean(),
        FieldType::Multiselect => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        FieldType::Keyvalue => KeyValuePair::list_from_value(value).is_some(),
        FieldType::File => FileDescriptor::list_from_value(value).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::{
        FileDescriptor, KeyValuePair, ValuePresence, coerce_number_input, is_datetime_local,
        matches_field_type, value_length,
    };
    use crate::FieldType;

    #[test]
    fn number_input_never_yields_nan() {
        assert_eq!(coerce_number_input(""), json!(null));
        assert_eq!(coerce_number_input("  "), json!(null));
        assert_eq!(coerce_number_input("abc"), json!(null));
        assert_eq!(coerce_number_input("NaN"), json!(null));
        assert_eq!(coerce_number_input("42"), json!(42));
        assert_eq!(coerce_number_input("2.5"), json!(2.5));
    }

    #[test]
    fn zero_is_present_but_unticked_checkbox_is_empty() {
        assert_eq!(
            ValuePresence::of(FieldType::Number, Some(&json!(0))),
            ValuePresence::Present
        );
        assert_eq!(
            ValuePresence::of(FieldType::Checkbox, Some(&json!(false))),
            ValuePresence::Empty
        );
        assert_eq!(ValuePresence::of(FieldType::Text, None), ValuePresence::Absent);
        assert_eq!(
            ValuePresence::of(FieldType::Text, Some(&json!("   "))),
            ValuePresence::Empty
        );
    }

    #[test]
    fn blank_key_value_rows_are_empty() {
        let value = KeyValuePair::list_to_value(&[KeyValuePair::default()]);
        assert_eq!(
            ValuePresence::of(FieldType::Keyvalue, Some(&value)),
            ValuePresence::Empty
        );

        let value = KeyValuePair::list_to_value(&[KeyValuePair::new("X-Token", "abc")]);
        assert_eq!(
            ValuePresence::of(FieldType::Keyvalue, Some(&value)),
            ValuePresence::Present
        );
    }

    #[test]
    fn lengths_count_characters_and_items() {
        assert_eq!(value_length(&json!("héllo")), Some(5));
        assert_eq!(value_length(&json!(["a", "b"])), Some(2));
        assert_eq!(value_length(&json!(3)), None);
    }

    #[test]
    fn field_type_shapes_are_checked() {
        assert!(matches_field_type(FieldType::Number, &json!(1.5)));
        assert!(!matches_field_type(FieldType::Number, &json!("1.5")));
        assert!(matches_field_type(FieldType::Datetime, &json!("2026-10-19T09:30")));
        assert!(!matches_field_type(FieldType::Datetime, &json!("tomorrow")));
        assert!(matches_field_type(
            FieldType::File,
            &FileDescriptor::list_to_value(&[FileDescriptor::new("a.pdf", 10, "application/pdf")])
        ));
        assert!(!matches_field_type(FieldType::Multiselect, &json!(["a", 1])));
    }

    #[test]
    fn datetime_local_accepts_seconds() {
        assert!(is_datetime_local("2026-10-19T09:30:15"));
        assert!(!is_datetime_local("2026-10-19"));
    }

    #[test]
    fn file_descriptor_uses_type_key() {
        let value = FileDescriptor::list_to_value(&[FileDescriptor::new("a.png", 3, "image/png")]);
        assert_eq!(value, json!([{ "name": "a.png", "size": 3, "type": "image/png" }]));
    }

    proptest! {
        #[test]
        fn number_input_is_null_or_finite(raw in ".{0,24}") {
            let value = coerce_number_input(raw.as_str());
            prop_assert!(
                value.is_null() || value.as_f64().is_some_and(f64::is_finite),
                "unexpected coercion {value:?} for {raw:?}"
            );
        }
    }
}
