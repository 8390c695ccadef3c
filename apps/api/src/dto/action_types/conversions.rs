use cadence_application::{InjectedOptions, RenderedField, ValidationOutcome};
use cadence_core::AppError;
use cadence_domain::{FieldDefinition, FieldOption, OptionsSource};

use super::types::{
    FieldDefinitionResponse, FieldOptionDto, RenderFormRequest, RenderedFieldResponse,
    ValidationResponse,
};

impl From<&FieldDefinition> for FieldDefinitionResponse {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            name: field.name().as_str().to_owned(),
            label: field.label().as_str().to_owned(),
            field_type: field.field_type().as_str().to_owned(),
            required: field.is_required(),
            default_value: field.default_value().cloned(),
            options: field
                .options()
                .iter()
                .map(|option| FieldOptionDto {
                    value: option.value().to_owned(),
                    label: option.label().to_owned(),
                })
                .collect(),
            injected_options_source: match field.options_source() {
                OptionsSource::Injected { source } => Some(source.clone()),
                OptionsSource::Static => None,
            },
            max_length: field.max_length(),
            placeholder: field.placeholder().map(str::to_owned),
            help_text: field.help_text().map(str::to_owned),
            validation_rule: field.validation().map(|rule| rule.rule_name().to_owned()),
            show_when: field
                .show_when()
                .and_then(|rule| serde_json::to_value(rule).ok()),
        }
    }
}

impl TryFrom<RenderedField> for RenderedFieldResponse {
    type Error = AppError;

    fn try_from(field: RenderedField) -> Result<Self, Self::Error> {
        let control = serde_json::to_value(&field.control).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize control of field '{}': {error}",
                field.name
            ))
        })?;

        Ok(Self {
            name: field.name,
            label: field.label,
            required: field.required,
            placeholder: field.placeholder,
            help_text: field.help_text,
            control,
            error: field.error,
        })
    }
}

impl From<ValidationOutcome> for ValidationResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            summary: outcome.summary(),
            is_valid: outcome.is_valid,
            errors: outcome.errors,
        }
    }
}

impl RenderFormRequest {
    pub fn injected_options(&self) -> InjectedOptions {
        self.injected_options
            .iter()
            .map(|(source, options)| {
                (
                    source.clone(),
                    options
                        .iter()
                        .map(|option| FieldOption::new(option.value.clone(), option.label.clone()))
                        .collect(),
                )
            })
            .collect()
    }
}
