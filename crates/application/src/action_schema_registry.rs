mod builtin;

pub use builtin::EMAIL_TEMPLATE_SOURCE;


use std::collections::HashSet;

use cadence_core::{AppError, AppResult};
use cadence_domain::{ActionTypeDefinition, ConfigMap, FieldDefinition};

use crate::config_validator::{ValidationOptions, ValidationOutcome, validate_fields};

/// Immutable lookup from action type name to its field schema.
///
/// Built once at startup; malformed definitions fail construction.
#[derive(Debug, Clone)]
pub struct ActionSchemaRegistry {
    action_types: Vec<ActionTypeDefinition>,
}

impl ActionSchemaRegistry {
    /// Creates a registry, rejecting duplicate action type names.
    pub fn new(action_types: Vec<ActionTypeDefinition>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for action_type in &action_types {
            if !seen.insert(action_type.name().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate action type '{}' in registry",
                    action_type.name().as_str()
                )));
            }
        }

        Ok(Self { action_types })
    }

    /// Creates the registry of built-in connection-plan action types.
    pub fn builtin() -> AppResult<Self> {
        Self::new(builtin::action_types()?)
    }

    /// Returns the ordered fields of `action_type`, empty when unknown.
    #[must_use]
    pub fn get_fields(&self, action_type: &str) -> &[FieldDefinition] {
        self.action_type(action_type)
            .map(ActionTypeDefinition::fields)
            .unwrap_or_default()
    }

    /// Finds one action type definition.
    #[must_use]
    pub fn action_type(&self, action_type: &str) -> Option<&ActionTypeDefinition> {
        self.action_types
            .iter()
            .find(|definition| definition.name().as_str() == action_type)
    }

    /// Returns every action type in selector order.
    #[must_use]
    pub fn action_types(&self) -> &[ActionTypeDefinition] {
        &self.action_types
    }

    /// Returns the action type names in selector order.
    pub fn action_type_names(&self) -> impl Iterator<Item = &str> {
        self.action_types
            .iter()
            .map(|definition| definition.name().as_str())
    }

    /// Validates `config` against the fields of `action_type`.
    #[must_use]
    pub fn validate(
        &self,
        action_type: &str,
        config: &ConfigMap,
        options: ValidationOptions,
    ) -> ValidationOutcome {
        validate_fields(self.get_fields(action_type), config, options)
    }
}
