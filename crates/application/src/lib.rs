//! Application services and ports.

#![forbid(unsafe_code)]

mod action_editor_session;
mod action_schema_registry;
mod action_schema_service;
mod config_validator;
mod field_renderer;
mod plan_action_ports;

pub use action_editor_session::ActionEditorSession;
pub use action_schema_registry::{ActionSchemaRegistry, EMAIL_TEMPLATE_SOURCE};
pub use action_schema_service::{ActionSchemaService, InjectedOptions};
pub use config_validator::{ValidationOptions, ValidationOutcome, validate_fields};
pub use field_renderer::{
    CharacterCounter, ControlOption, CounterBand, FieldChange, FieldControl, KeyValueRow,
    RenderContext, RenderedField, apply_change, render_field, render_form,
};
pub use plan_action_ports::{PlanActionRepository, SavePlanActionInput, TokenVocabulary};
