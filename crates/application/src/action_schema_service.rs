use std::collections::BTreeMap;
use std::sync::Arc;

use cadence_core::{AppError, AppResult};
use cadence_domain::{
    ConfigMap, DeliveryTiming, FieldDefinition, FieldOption, OptionsSource, PlanAction,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::action_editor_session::ActionEditorSession;
use crate::action_schema_registry::ActionSchemaRegistry;
use crate::config_validator::{ValidationOptions, ValidationOutcome};
use crate::field_renderer::{FieldChange, RenderContext, RenderedField, apply_change, render_form};
use crate::plan_action_ports::{PlanActionRepository, SavePlanActionInput, TokenVocabulary};

#[cfg(test)]
mod tests;

/// Host-fetched options keyed by injected option source name.
pub type InjectedOptions = BTreeMap<String, Vec<FieldOption>>;

/// Application service for configuring connection-plan actions.
#[derive(Clone)]
pub struct ActionSchemaService {
    registry: Arc<ActionSchemaRegistry>,
    token_vocabulary: Arc<dyn TokenVocabulary>,
    repository: Arc<dyn PlanActionRepository>,
    validation_options: ValidationOptions,
}

impl ActionSchemaService {
    /// Creates an action schema service.
    #[must_use]
    pub fn new(
        registry: Arc<ActionSchemaRegistry>,
        token_vocabulary: Arc<dyn TokenVocabulary>,
        repository: Arc<dyn PlanActionRepository>,
    ) -> Self {
        Self {
            registry,
            token_vocabulary,
            repository,
            validation_options: ValidationOptions::default(),
        }
    }

    /// Overrides how configs are validated.
    #[must_use]
    pub fn with_validation_options(mut self, validation_options: ValidationOptions) -> Self {
        self.validation_options = validation_options;
        self
    }

    /// Returns the shared registry.
    #[must_use]
    pub fn registry(&self) -> &ActionSchemaRegistry {
        self.registry.as_ref()
    }

    /// Returns the active validation options.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        self.validation_options
    }

    /// Returns the merge tokens offered by token fields.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.token_vocabulary.tokens()
    }

    /// Returns the fields of `action_type` with injected options composed in.
    ///
    /// Registry entries are never modified; injected fields are copied.
    pub fn fields_with_options(
        &self,
        action_type: &str,
        injected_options: &InjectedOptions,
    ) -> AppResult<Vec<FieldDefinition>> {
        let definition = self
            .registry
            .action_type(action_type)
            .ok_or_else(|| unknown_action_type(action_type))?;

        Ok(definition
            .fields()
            .iter()
            .map(|field| match field.options_source() {
                OptionsSource::Injected { source } => field.with_options(
                    injected_options
                        .get(source.as_str())
                        .cloned()
                        .unwrap_or_default(),
                ),
                OptionsSource::Static => field.clone(),
            })
            .collect())
    }

    /// Renders the visible fields of `action_type` against `config`.
    pub fn render_form(
        &self,
        action_type: &str,
        config: &ConfigMap,
        errors: &BTreeMap<String, String>,
        injected_options: &InjectedOptions,
    ) -> AppResult<Vec<RenderedField>> {
        let fields = self.fields_with_options(action_type, injected_options)?;
        let tokens = self.tokens();

        Ok(render_form(
            &fields,
            errors,
            RenderContext {
                form_values: config,
                tokens: &tokens,
            },
        ))
    }

    /// Applies one change to a field value and returns the whole new value.
    pub fn apply_change(
        &self,
        action_type: &str,
        field_name: &str,
        current: Option<&Value>,
        change: FieldChange,
    ) -> AppResult<Value> {
        let definition = self
            .registry
            .action_type(action_type)
            .ok_or_else(|| unknown_action_type(action_type))?;
        let field = definition.field(field_name).ok_or_else(|| {
            AppError::NotFound(format!(
                "field '{field_name}' does not exist on action type '{action_type}'"
            ))
        })?;

        apply_change(field, current, change)
    }

    /// Validates `config` against `action_type`; unknown types have no fields to fail.
    #[must_use]
    pub fn validate(&self, action_type: &str, config: &ConfigMap) -> ValidationOutcome {
        self.registry
            .validate(action_type, config, self.validation_options)
    }

    /// Opens an editor session pre-populated with `config`.
    pub fn open_session(
        &self,
        action_type: &str,
        config: ConfigMap,
        injected_options: &InjectedOptions,
    ) -> AppResult<ActionEditorSession> {
        let fields = self.fields_with_options(action_type, injected_options)?;
        debug!(action_type, field_count = fields.len(), "opened action editor session");

        Ok(ActionEditorSession::open(
            action_type,
            fields,
            config,
            self.validation_options,
        ))
    }

    /// Validates and persists a configured action at the end of its plan.
    pub async fn save_action(&self, input: SavePlanActionInput) -> AppResult<PlanAction> {
        if self.registry.action_type(input.action_type.as_str()).is_none() {
            return Err(unknown_action_type(input.action_type.as_str()));
        }

        let outcome = self.validate(input.action_type.as_str(), &input.config);
        if !outcome.is_valid {
            warn!(
                plan_id = %input.plan_id,
                action_type = %input.action_type,
                error_count = outcome.errors.len(),
                "rejected invalid action config"
            );
            return Err(AppError::Validation(outcome.summary()));
        }

        let delivery_timing = DeliveryTiming::from_parts(
            input.delivery_type.as_str(),
            input.delay_value,
            input.delay_unit.as_deref(),
        )?;
        let action = PlanAction::new(
            input.plan_id,
            input.action_type,
            0,
            Value::Object(input.config),
            delivery_timing,
        )?;
        let action = self.repository.append_action(action).await?;

        info!(
            plan_id = %action.plan_id(),
            action_id = %action.action_id(),
            action_type = %action.action_type(),
            position = action.position(),
            delivery = %action.delivery_timing(),
            "saved connection plan action"
        );

        Ok(action)
    }

    /// Lists the actions of one connection plan.
    pub async fn list_actions(&self, plan_id: &str) -> AppResult<Vec<PlanAction>> {
        self.repository.list_actions(plan_id).await
    }
}

fn unknown_action_type(action_type: &str) -> AppError {
    AppError::NotFound(format!("action type '{action_type}' does not exist"))
}
