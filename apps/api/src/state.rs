use std::sync::Arc;

use cadence_application::{ActionSchemaRegistry, ActionSchemaService};
use cadence_core::AppError;
use cadence_infrastructure::{InMemoryPlanActionRepository, StaticTokenVocabulary};

use crate::api_config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub action_schema_service: ActionSchemaService,
}

impl AppState {
    /// Wires the registry and adapters; a malformed built-in schema fails startup.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let registry = Arc::new(ActionSchemaRegistry::builtin()?);
        let token_vocabulary = Arc::new(StaticTokenVocabulary::with_extra_tokens(
            config.extra_tokens.iter().cloned(),
        ));
        let plan_action_repository = Arc::new(InMemoryPlanActionRepository::new());

        let action_schema_service =
            ActionSchemaService::new(registry, token_vocabulary, plan_action_repository)
                .with_validation_options(config.validation_options);

        Ok(Self {
            action_schema_service,
        })
    }
}
