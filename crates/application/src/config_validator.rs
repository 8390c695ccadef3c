
use std::collections::BTreeMap;

use cadence_domain::{
    ConfigMap, FieldDefinition, FieldType, OptionsSource, ValuePresence, matches_field_type,
    value_length,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Switches that change how a config is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Skip fields whose visibility rule is false for the validated config.
    pub respect_visibility: bool,
}

impl ValidationOptions {
    /// Validates hidden fields too, which lets a hidden required field block saving.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            respect_visibility: false,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            respect_visibility: true,
        }
    }
}

/// Result of validating one aggregate config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationOutcome {
    /// Whether no field reported an error.
    pub is_valid: bool,
    /// Error message by field name.
    pub errors: BTreeMap<String, String>,
}

impl ValidationOutcome {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Returns every message joined in field name order.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validates `config` against `fields`.
///
/// Checks run per field and key errors by field name. The max-length check
/// runs last and replaces any earlier message for the same field.
#[must_use]
pub fn validate_fields(
    fields: &[FieldDefinition],
    config: &ConfigMap,
    options: ValidationOptions,
) -> ValidationOutcome {
    let mut errors = BTreeMap::new();

    for field in fields {
        if options.respect_visibility && !field.is_visible(config) {
            continue;
        }

        let name = field.name().as_str();
        let label = field.label().as_str();
        let value = config.get(name);
        let presence = ValuePresence::of(field.field_type(), value);

        if field.is_required() && !presence.is_present() {
            errors.insert(name.to_owned(), format!("{label} is required"));
        } else if let Some(value) = value.filter(|_| presence.is_present())
            && let Some(message) = present_value_error(field, value)
        {
            errors.insert(name.to_owned(), message);
        }

        if let Some(max_length) = field.max_length()
            && let Some(length) = value.and_then(value_length)
            && length > max_length
        {
            errors.insert(
                name.to_owned(),
                format!("{label} must not exceed {max_length} characters"),
            );
        }
    }

    ValidationOutcome::from_errors(errors)
}

fn present_value_error(field: &FieldDefinition, value: &Value) -> Option<String> {
    let label = field.label().as_str();

    if !matches_field_type(field.field_type(), value) {
        return Some(format!("{label} has an invalid value"));
    }

    if has_unknown_option(field, value) {
        return Some(format!("{label} contains an unknown option"));
    }

    field.validation().and_then(|rule| rule.evaluate(value))
}

fn has_unknown_option(field: &FieldDefinition, value: &Value) -> bool {
    let checks_options = field.field_type().uses_options()
        && field.options_source() == &OptionsSource::Static
        && !field.options().is_empty();
    if !checks_options {
        return false;
    }

    match field.field_type() {
        FieldType::Multiselect => value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .any(|selected| !field.has_option(selected)),
        _ => value
            .as_str()
            .is_some_and(|selected| !selected.is_empty() && !field.has_option(selected)),
    }
}
