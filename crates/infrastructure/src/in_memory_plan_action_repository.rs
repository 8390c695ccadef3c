use std::collections::HashMap;

use async_trait::async_trait;
use cadence_application::PlanActionRepository;
use cadence_core::{AppError, AppResult};
use cadence_domain::PlanAction;
use tokio::sync::RwLock;

/// In-memory plan action repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryPlanActionRepository {
    actions: RwLock<HashMap<String, Vec<PlanAction>>>,
}

impl InMemoryPlanActionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanActionRepository for InMemoryPlanActionRepository {
    async fn append_action(&self, action: PlanAction) -> AppResult<PlanAction> {
        let mut actions = self.actions.write().await;
        let plan_actions = actions
            .entry(action.plan_id().as_str().to_owned())
            .or_default();

        if plan_actions
            .iter()
            .any(|stored| stored.action_id() == action.action_id())
        {
            return Err(AppError::Conflict(format!(
                "action '{}' already exists in connection plan '{}'",
                action.action_id(),
                action.plan_id()
            )));
        }

        let position = u32::try_from(plan_actions.len()).map_err(|_| {
            AppError::Conflict(format!(
                "connection plan '{}' cannot hold more actions",
                action.plan_id()
            ))
        })?;
        let action = action.with_position(position);
        plan_actions.push(action.clone());

        Ok(action)
    }

    async fn list_actions(&self, plan_id: &str) -> AppResult<Vec<PlanAction>> {
        Ok(self
            .actions
            .read()
            .await
            .get(plan_id)
            .cloned()
            .unwrap_or_default())
    }
}
