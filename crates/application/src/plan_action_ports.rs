mod inputs;
mod repository;
mod vocabulary;

pub use inputs::SavePlanActionInput;
pub use repository::PlanActionRepository;
pub use vocabulary::TokenVocabulary;
