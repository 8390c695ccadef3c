pub mod action_types;
pub mod health;
pub mod plan_actions;
