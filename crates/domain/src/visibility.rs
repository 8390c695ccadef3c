use cadence_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConfigMap, is_truthy};

/// Operators available to visibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityOperator {
    /// Field value equals the condition value.
    Equals,
    /// Field value differs from the condition value.
    NotEquals,
    /// Field value is one of the values in the condition array.
    OneOf,
    /// Field value reads as set.
    IsTruthy,
    /// Field value is missing, null, an empty string or an empty list.
    IsEmpty,
}

/// One predicate over another field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityCondition {
    field: NonEmptyString,
    operator: VisibilityOperator,
    #[serde(default)]
    value: Value,
}

impl VisibilityCondition {
    /// Creates a validated condition.
    pub fn new(
        field: impl Into<String>,
        operator: VisibilityOperator,
        value: Value,
    ) -> AppResult<Self> {
        if operator == VisibilityOperator::OneOf && !value.is_array() {
            return Err(AppError::Validation(
                "one_of visibility conditions require an array value".to_owned(),
            ));
        }

        Ok(Self {
            field: NonEmptyString::new(field)?,
            operator,
            value,
        })
    }

    /// Returns the field the condition reads.
    #[must_use]
    pub fn field(&self) -> &NonEmptyString {
        &self.field
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> VisibilityOperator {
        self.operator
    }

    /// Returns the comparison value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn matches(&self, form_values: &ConfigMap) -> bool {
        let current = form_values
            .get(self.field.as_str())
            .unwrap_or(&Value::Null);

        match self.operator {
            VisibilityOperator::Equals => current == &self.value,
            VisibilityOperator::NotEquals => current != &self.value,
            VisibilityOperator::OneOf => self
                .value
                .as_array()
                .is_some_and(|candidates| candidates.contains(current)),
            VisibilityOperator::IsTruthy => is_truthy(current),
            VisibilityOperator::IsEmpty => match current {
                Value::Null => true,
                Value::String(text) => text.trim().is_empty(),
                Value::Array(items) => items.is_empty(),
                _ => false,
            },
        }
    }
}

/// Visibility predicate: every condition must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRule {
    conditions: Vec<VisibilityCondition>,
}

impl VisibilityRule {
    /// Creates a rule requiring all `conditions`.
    pub fn all(conditions: Vec<VisibilityCondition>) -> AppResult<Self> {
        if conditions.is_empty() {
            return Err(AppError::Validation(
                "visibility rules require at least one condition".to_owned(),
            ));
        }

        Ok(Self { conditions })
    }

    /// Shorthand for a single-condition rule.
    pub fn when(
        field: impl Into<String>,
        operator: VisibilityOperator,
        value: Value,
    ) -> AppResult<Self> {
        Self::all(vec![VisibilityCondition::new(field, operator, value)?])
    }

    /// Returns the conditions.
    #[must_use]
    pub fn conditions(&self) -> &[VisibilityCondition] {
        &self.conditions
    }

    /// Evaluates the rule against the aggregate config.
    #[must_use]
    pub fn is_satisfied(&self, form_values: &ConfigMap) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(form_values))
    }
}
