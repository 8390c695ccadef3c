use async_trait::async_trait;
use cadence_core::AppResult;
use cadence_domain::PlanAction;

/// Repository port for configured connection-plan actions.
#[async_trait]
pub trait PlanActionRepository: Send + Sync {
    /// Appends one configured action to the end of its plan.
    ///
    /// The repository assigns the position atomically with the write and
    /// returns the action as stored.
    async fn append_action(&self, action: PlanAction) -> AppResult<PlanAction>;

    /// Lists the actions of one plan ordered by position.
    async fn list_actions(&self, plan_id: &str) -> AppResult<Vec<PlanAction>>;
}
