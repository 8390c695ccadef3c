mod action_types;
mod common;
mod plan_actions;

pub use action_types::{
    ActionTypeSummaryResponse, ApplyFieldChangeRequest, FieldDefinitionResponse,
    FieldValueResponse, RenderFormRequest, RenderedFieldResponse, ValidateConfigRequest,
    ValidationResponse,
};
pub use common::HealthResponse;
pub use plan_actions::{PlanActionResponse, SavePlanActionRequest};
