mod cors;

use axum::Router;
use axum::routing::{get, post};
use cadence_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let action_type_routes = Router::new()
        .route(
            "/api/action-types",
            get(handlers::action_types::list_action_types_handler),
        )
        .route(
            "/api/action-types/{action_type}/fields",
            get(handlers::action_types::list_action_type_fields_handler),
        )
        .route(
            "/api/action-types/{action_type}/render",
            post(handlers::action_types::render_action_form_handler),
        )
        .route(
            "/api/action-types/{action_type}/changes",
            post(handlers::action_types::apply_field_change_handler),
        )
        .route(
            "/api/action-types/{action_type}/validate",
            post(handlers::action_types::validate_action_config_handler),
        );

    let plan_action_routes = Router::new().route(
        "/api/connection-plans/{plan_id}/actions",
        get(handlers::plan_actions::list_plan_actions_handler)
            .post(handlers::plan_actions::save_plan_action_handler),
    );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(action_type_routes)
        .merge(plan_action_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
