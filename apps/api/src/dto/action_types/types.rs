use std::collections::BTreeMap;

use cadence_application::FieldChange;
use cadence_domain::ConfigMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// API representation of one registered action type.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/action-type-summary-response.ts"
)]
pub struct ActionTypeSummaryResponse {
    pub name: String,
    pub field_count: usize,
}

/// One selectable field option.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-option-dto.ts"
)]
pub struct FieldOptionDto {
    pub value: String,
    pub label: String,
}

/// API representation of a field definition.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-definition-response.ts"
)]
pub struct FieldDefinitionResponse {
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    #[ts(type = "unknown | null")]
    pub default_value: Option<Value>,
    pub options: Vec<FieldOptionDto>,
    pub injected_options_source: Option<String>,
    pub max_length: Option<usize>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub validation_rule: Option<String>,
    #[ts(type = "unknown | null")]
    pub show_when: Option<Value>,
}

/// Incoming payload for headless form rendering.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/render-form-request.ts"
)]
pub struct RenderFormRequest {
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub config: ConfigMap,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
    #[serde(default)]
    pub injected_options: BTreeMap<String, Vec<FieldOptionDto>>,
}

/// API representation of one rendered field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rendered-field-response.ts"
)]
pub struct RenderedFieldResponse {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    #[ts(type = "Record<string, unknown>")]
    pub control: Value,
    pub error: Option<String>,
}

/// Incoming payload for one field change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/apply-field-change-request.ts"
)]
pub struct ApplyFieldChangeRequest {
    pub field: String,
    #[ts(type = "unknown | null")]
    pub current: Option<Value>,
    #[ts(type = "Record<string, unknown>")]
    pub change: FieldChange,
}

/// New whole value of one field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-value-response.ts"
)]
pub struct FieldValueResponse {
    pub field: String,
    #[ts(type = "unknown")]
    pub value: Value,
}

/// Incoming payload for config validation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validate-config-request.ts"
)]
pub struct ValidateConfigRequest {
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub config: ConfigMap,
}

/// Validation outcome payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-response.ts"
)]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
    pub summary: String,
}
