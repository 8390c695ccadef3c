//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_plan_action_repository;
mod static_token_vocabulary;

pub use in_memory_plan_action_repository::InMemoryPlanActionRepository;
pub use static_token_vocabulary::{DEFAULT_TOKENS, StaticTokenVocabulary};
