//! Domain entities and invariants for connection-plan action schemas.

#![forbid(unsafe_code)]

mod action_type;
mod delivery;
mod field;
mod field_value;
mod plan_action;
mod value_rule;
mod visibility;

pub use action_type::ActionTypeDefinition;
pub use delivery::{DeliveryTiming, DeliveryUnit};
pub use field::{FieldDefinition, FieldDefinitionBuilder, FieldOption, FieldType, OptionsSource};
pub use field_value::{
    ConfigMap, FileDescriptor, KeyValuePair, ValuePresence, coerce_number_input,
    is_datetime_local, is_truthy, matches_field_type, value_length,
};
pub use plan_action::PlanAction;
pub use value_rule::{ValueCheck, ValueRule};
pub use visibility::{VisibilityCondition, VisibilityOperator, VisibilityRule};
