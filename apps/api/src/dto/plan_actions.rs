use cadence_application::SavePlanActionInput;
use cadence_domain::{ConfigMap, PlanAction};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Incoming payload for attaching an action to a connection plan.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-plan-action-request.ts"
)]
pub struct SavePlanActionRequest {
    pub action_type: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub config: ConfigMap,
    pub delivery_type: Option<String>,
    pub delay_value: Option<u32>,
    pub delay_unit: Option<String>,
}

impl SavePlanActionRequest {
    pub fn into_input(self, plan_id: String) -> SavePlanActionInput {
        SavePlanActionInput {
            plan_id,
            action_type: self.action_type,
            config: self.config,
            delivery_type: self
                .delivery_type
                .unwrap_or_else(|| "immediate".to_owned()),
            delay_value: self.delay_value,
            delay_unit: self.delay_unit,
        }
    }
}

/// API representation of a configured plan action.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/plan-action-response.ts"
)]
pub struct PlanActionResponse {
    pub action_id: String,
    pub plan_id: String,
    pub action_type: String,
    pub position: u32,
    #[ts(type = "Record<string, unknown>")]
    pub config: Value,
    pub delivery_timing: String,
    #[ts(type = "number")]
    pub delay_minutes: u64,
    pub created_at: String,
}

impl From<PlanAction> for PlanActionResponse {
    fn from(action: PlanAction) -> Self {
        Self {
            action_id: action.action_id().to_string(),
            plan_id: action.plan_id().as_str().to_owned(),
            action_type: action.action_type().as_str().to_owned(),
            position: action.position(),
            config: action.config().clone(),
            delivery_timing: action.delivery_timing().to_string(),
            delay_minutes: action.delivery_timing().delay_minutes(),
            created_at: action.created_at().to_rfc3339(),
        }
    }
}
