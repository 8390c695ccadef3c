use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{PlanActionResponse, SavePlanActionRequest};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn save_plan_action_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(payload): Json<SavePlanActionRequest>,
) -> ApiResult<(StatusCode, Json<PlanActionResponse>)> {
    let action = state
        .action_schema_service
        .save_action(payload.into_input(plan_id))
        .await?;

    Ok((StatusCode::CREATED, Json(PlanActionResponse::from(action))))
}

pub async fn list_plan_actions_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> ApiResult<Json<Vec<PlanActionResponse>>> {
    let actions = state
        .action_schema_service
        .list_actions(plan_id.as_str())
        .await?
        .into_iter()
        .map(PlanActionResponse::from)
        .collect();

    Ok(Json(actions))
}
