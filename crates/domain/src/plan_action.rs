use cadence_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::DeliveryTiming;

/// Validated action handed to the persistence boundary of a connection plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAction {
    action_id: Uuid,
    plan_id: NonEmptyString,
    action_type: NonEmptyString,
    position: u32,
    config: Value,
    delivery_timing: DeliveryTiming,
    created_at: DateTime<Utc>,
}

impl PlanAction {
    /// Creates a plan action with a fresh identifier.
    pub fn new(
        plan_id: impl Into<String>,
        action_type: impl Into<String>,
        position: u32,
        config: Value,
        delivery_timing: DeliveryTiming,
    ) -> AppResult<Self> {
        if !config.is_object() {
            return Err(AppError::Validation(
                "plan action config must be a JSON object".to_owned(),
            ));
        }

        Ok(Self {
            action_id: Uuid::new_v4(),
            plan_id: NonEmptyString::new(plan_id)?,
            action_type: NonEmptyString::new(action_type)?,
            position,
            config,
            delivery_timing,
            created_at: Utc::now(),
        })
    }

    /// Moves the action to `position` inside its plan.
    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Returns the action identifier.
    #[must_use]
    pub fn action_id(&self) -> Uuid {
        self.action_id
    }

    /// Returns the owning connection plan.
    #[must_use]
    pub fn plan_id(&self) -> &NonEmptyString {
        &self.plan_id
    }

    /// Returns the action type name.
    #[must_use]
    pub fn action_type(&self) -> &NonEmptyString {
        &self.action_type
    }

    /// Returns the zero-based position inside the plan.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns the opaque config object.
    #[must_use]
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Returns the delivery timing.
    #[must_use]
    pub fn delivery_timing(&self) -> DeliveryTiming {
        self.delivery_timing
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PlanAction;
    use crate::DeliveryTiming;

    #[test]
    fn requires_object_config() {
        let result = PlanAction::new("plan-1", "SMS", 0, json!("hi"), DeliveryTiming::Immediate);
        assert!(result.is_err());
    }

    #[test]
    fn requires_plan_and_action_type() {
        assert!(PlanAction::new(" ", "SMS", 0, json!({}), DeliveryTiming::Immediate).is_err());
        assert!(PlanAction::new("plan-1", "", 0, json!({}), DeliveryTiming::Immediate).is_err());
    }

    #[test]
    fn with_position_keeps_identity() {
        let action = PlanAction::new("plan-1", "SMS", 0, json!({}), DeliveryTiming::Immediate)
            .unwrap_or_else(|_| unreachable!());
        let moved = action.clone().with_position(4);

        assert_eq!(moved.position(), 4);
        assert_eq!(moved.action_id(), action.action_id());
    }
}
