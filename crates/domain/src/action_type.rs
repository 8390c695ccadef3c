use std::collections::HashSet;

use cadence_core::{AppError, AppResult, NonEmptyString};
use serde::Serialize;

use crate::{FieldDefinition, FieldType, OptionsSource, matches_field_type};

/// Ordered field schema of one connection-plan action type.
#[derive(Debug, Clone, Serialize)]
pub struct ActionTypeDefinition {
    name: NonEmptyString,
    fields: Vec<FieldDefinition>,
}

impl ActionTypeDefinition {
    /// Creates an action type, rejecting malformed field schemas.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate field name '{}' in action type '{}'",
                    field.name().as_str(),
                    name.as_str()
                )));
            }
        }

        for field in &fields {
            Self::validate_options(name.as_str(), field)?;
            Self::validate_default_value(name.as_str(), field)?;
        }

        for field in &fields {
            let Some(rule) = field.show_when() else {
                continue;
            };

            for condition in rule.conditions() {
                let target = condition.field().as_str();
                if target == field.name().as_str() {
                    return Err(AppError::Validation(format!(
                        "field '{}' in action type '{}' cannot depend on its own visibility",
                        target,
                        name.as_str()
                    )));
                }
                if !seen.contains(target) {
                    return Err(AppError::Validation(format!(
                        "field '{}' in action type '{}' references unknown field '{}' in show_when",
                        field.name().as_str(),
                        name.as_str(),
                        target
                    )));
                }
            }
        }

        Ok(Self { name, fields })
    }

    fn validate_options(action_type: &str, field: &FieldDefinition) -> AppResult<()> {
        if !field.field_type().uses_options() {
            if !field.options().is_empty() {
                return Err(AppError::Validation(format!(
                    "field '{}' in action type '{}' is '{}' and cannot declare options",
                    field.name().as_str(),
                    action_type,
                    field.field_type().as_str()
                )));
            }
            return Ok(());
        }

        if field.is_required()
            && field.options().is_empty()
            && field.options_source() == &OptionsSource::Static
        {
            return Err(AppError::Validation(format!(
                "required field '{}' in action type '{}' has no options",
                field.name().as_str(),
                action_type
            )));
        }

        let mut seen = HashSet::new();
        for option in field.options() {
            if !seen.insert(option.value()) {
                return Err(AppError::Validation(format!(
                    "duplicate option value '{}' for field '{}' in action type '{}'",
                    option.value(),
                    field.name().as_str(),
                    action_type
                )));
            }
        }

        Ok(())
    }

    fn validate_default_value(action_type: &str, field: &FieldDefinition) -> AppResult<()> {
        let Some(default_value) = field.default_value() else {
            return Ok(());
        };

        if !matches_field_type(field.field_type(), default_value) {
            return Err(AppError::Validation(format!(
                "default value of field '{}' in action type '{}' does not match field type '{}'",
                field.name().as_str(),
                action_type,
                field.field_type().as_str()
            )));
        }

        let static_options = field.field_type().uses_options()
            && field.options_source() == &OptionsSource::Static;
        if !static_options {
            return Ok(());
        }

        let unknown = match field.field_type() {
            FieldType::Multiselect => default_value
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|item| item.as_str())
                .find(|item| !field.has_option(item)),
            _ => default_value
                .as_str()
                .filter(|selected| !field.has_option(selected)),
        };

        if let Some(unknown) = unknown {
            return Err(AppError::Validation(format!(
                "default value '{}' of field '{}' in action type '{}' is not an option",
                unknown,
                field.name().as_str(),
                action_type
            )));
        }

        Ok(())
    }

    /// Returns the action type name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the fields in render order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Finds one field by name.
    #[must_use]
    pub fn field(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .find(|field| field.name().as_str() == field_name)
    }
}
