use std::collections::BTreeMap;

use cadence_core::{AppError, AppResult};
use cadence_domain::{ConfigMap, FieldDefinition};

use crate::config_validator::{ValidationOptions, ValidationOutcome, validate_fields};
use crate::field_renderer::{FieldChange, RenderContext, RenderedField, apply_change, render_form};

/// Editing state for one action while its config form is open.
///
/// The session owns its config exclusively and is discarded on finish or drop.
#[derive(Debug, Clone)]
pub struct ActionEditorSession {
    action_type: String,
    fields: Vec<FieldDefinition>,
    config: ConfigMap,
    errors: BTreeMap<String, String>,
    options: ValidationOptions,
}

impl ActionEditorSession {
    /// Opens a session over `fields`, pre-populated with `config`.
    #[must_use]
    pub fn open(
        action_type: impl Into<String>,
        fields: Vec<FieldDefinition>,
        config: ConfigMap,
        options: ValidationOptions,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            fields,
            config,
            errors: BTreeMap::new(),
            options,
        }
    }

    /// Returns the edited action type name.
    #[must_use]
    pub fn action_type(&self) -> &str {
        self.action_type.as_str()
    }

    /// Returns the fields, options already composed in.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Returns the current aggregate config.
    #[must_use]
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Returns the errors from the last validation, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Renders the visible fields against the current config.
    #[must_use]
    pub fn render(&self, tokens: &[String]) -> Vec<RenderedField> {
        render_form(
            &self.fields,
            &self.errors,
            RenderContext {
                form_values: &self.config,
                tokens,
            },
        )
    }

    /// Applies one change and stores the whole new value under the field name.
    pub fn apply(&mut self, field_name: &str, change: FieldChange) -> AppResult<()> {
        let field = self
            .fields
            .iter()
            .find(|field| field.name().as_str() == field_name)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "field '{field_name}' does not exist on action type '{}'",
                    self.action_type
                ))
            })?;

        let value = apply_change(field, self.config.get(field_name), change)?;
        self.config.insert(field_name.to_owned(), value);
        self.errors.remove(field_name);

        Ok(())
    }

    /// Validates the whole config and keeps the errors for rendering.
    pub fn validate(&mut self) -> ValidationOutcome {
        let outcome = validate_fields(&self.fields, &self.config, self.options);
        self.errors = outcome.errors.clone();
        outcome
    }

    /// Closes the session, returning the config when it validates.
    pub fn finish(mut self) -> AppResult<ConfigMap> {
        let outcome = self.validate();
        if !outcome.is_valid {
            return Err(AppError::Validation(outcome.summary()));
        }

        Ok(self.config)
    }
}
