use axum::Json;
use axum::extract::{Path, State};
use cadence_core::AppError;

use crate::dto::{
    ActionTypeSummaryResponse, ApplyFieldChangeRequest, FieldDefinitionResponse,
    FieldValueResponse, RenderFormRequest, RenderedFieldResponse, ValidateConfigRequest,
    ValidationResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn list_action_types_handler(
    State(state): State<AppState>,
) -> Json<Vec<ActionTypeSummaryResponse>> {
    let action_types = state
        .action_schema_service
        .registry()
        .action_types()
        .iter()
        .map(|action_type| ActionTypeSummaryResponse {
            name: action_type.name().as_str().to_owned(),
            field_count: action_type.fields().len(),
        })
        .collect();

    Json(action_types)
}

pub async fn list_action_type_fields_handler(
    State(state): State<AppState>,
    Path(action_type): Path<String>,
) -> ApiResult<Json<Vec<FieldDefinitionResponse>>> {
    let definition = state
        .action_schema_service
        .registry()
        .action_type(action_type.as_str())
        .ok_or_else(|| {
            AppError::NotFound(format!("action type '{action_type}' does not exist"))
        })?;

    Ok(Json(
        definition
            .fields()
            .iter()
            .map(FieldDefinitionResponse::from)
            .collect(),
    ))
}

pub async fn render_action_form_handler(
    State(state): State<AppState>,
    Path(action_type): Path<String>,
    Json(payload): Json<RenderFormRequest>,
) -> ApiResult<Json<Vec<RenderedFieldResponse>>> {
    let rendered = state.action_schema_service.render_form(
        action_type.as_str(),
        &payload.config,
        &payload.errors,
        &payload.injected_options(),
    )?;

    let fields = rendered
        .into_iter()
        .map(RenderedFieldResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(fields))
}

pub async fn apply_field_change_handler(
    State(state): State<AppState>,
    Path(action_type): Path<String>,
    Json(payload): Json<ApplyFieldChangeRequest>,
) -> ApiResult<Json<FieldValueResponse>> {
    let value = state.action_schema_service.apply_change(
        action_type.as_str(),
        payload.field.as_str(),
        payload.current.as_ref(),
        payload.change,
    )?;

    Ok(Json(FieldValueResponse {
        field: payload.field,
        value,
    }))
}

pub async fn validate_action_config_handler(
    State(state): State<AppState>,
    Path(action_type): Path<String>,
    Json(payload): Json<ValidateConfigRequest>,
) -> Json<ValidationResponse> {
    let outcome = state
        .action_schema_service
        .validate(action_type.as_str(), &payload.config);

    Json(ValidationResponse::from(outcome))
}
