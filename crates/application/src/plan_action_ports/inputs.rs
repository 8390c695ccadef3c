use cadence_domain::ConfigMap;
use serde::Deserialize;

/// Input payload for attaching a configured action to a connection plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavePlanActionInput {
    /// Owning connection plan.
    pub plan_id: String,
    /// Action type name from the registry.
    pub action_type: String,
    /// Aggregate field config.
    pub config: ConfigMap,
    /// Delivery mode: `immediate` or `delay`.
    pub delivery_type: String,
    /// Delay amount for delayed delivery.
    pub delay_value: Option<u32>,
    /// Delay unit for delayed delivery.
    pub delay_unit: Option<String>,
}

impl SavePlanActionInput {
    /// Creates an input for immediate delivery.
    #[must_use]
    pub fn immediate(
        plan_id: impl Into<String>,
        action_type: impl Into<String>,
        config: ConfigMap,
    ) -> Self {
        Self {
            plan_id: plan_id.into(),
            action_type: action_type.into(),
            config,
            delivery_type: "immediate".to_owned(),
            delay_value: None,
            delay_unit: None,
        }
    }
}
