//! Task action coordinator: the one place where progression state meets the
//! network.
//!
//! A status toggle is persisted first, then the whole goal is fetched again and
//! reloaded; local state is never patched optimistically, so a failure simply
//! leaves the previous state in place.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::animator::Clock;
use crate::engine::GoalAdventure;
use crate::error::Result;
use crate::goal::{Goal, TaskType};

pub const COMPLETED_MESSAGE: &str = "Task group completed! Keep up the great work.";
pub const REVERTED_MESSAGE: &str = "Task group marked as incomplete.";
pub const FAILURE_MESSAGE: &str = "Failed to update task status. Please try again.";

/// Who is acting; forwarded untouched to the collaborators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Whole-group status change, shaped like the REST request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub task_type: TaskType,
    pub goal_id: String,
    pub group_index: usize,
    pub status: bool,
}

#[async_trait]
pub trait GoalProvider: Send + Sync {
    async fn fetch_goal(&self, goal_id: &str, user: &UserContext) -> Result<Goal>;
}

#[async_trait]
pub trait TaskStatusMutator: Send + Sync {
    async fn update_group_status(&self, update: &StatusUpdate, user: &UserContext) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// Fire-and-forget user messages (toasts).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Completed,
    Reverted,
    Failed,
}

pub struct TaskActionCoordinator {
    provider: Arc<dyn GoalProvider>,
    mutator: Arc<dyn TaskStatusMutator>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    adventure: GoalAdventure,
    goal_id: String,
    user: UserContext,
}

impl TaskActionCoordinator {
    pub fn new(
        adventure: GoalAdventure,
        provider: Arc<dyn GoalProvider>,
        mutator: Arc<dyn TaskStatusMutator>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        goal_id: impl Into<String>,
        user: UserContext,
    ) -> Self {
        Self {
            provider,
            mutator,
            notifier,
            clock,
            adventure,
            goal_id: goal_id.into(),
            user,
        }
    }

    pub fn adventure(&self) -> &GoalAdventure {
        &self.adventure
    }

    pub fn adventure_mut(&mut self) -> &mut GoalAdventure {
        &mut self.adventure
    }

    pub fn goal_id(&self) -> &str {
        &self.goal_id
    }

    /// Fetches the current goal and loads it (running the initial replay for a
    /// goal not seen before). On error the previous state stays loaded.
    pub async fn load(&mut self) -> Result<()> {
        let goal = self.provider.fetch_goal(&self.goal_id, &self.user).await?;
        self.adventure.load_goal(Some(goal), self.clock.now_ms());
        Ok(())
    }

    /// Points the coordinator at another goal or user and loads it, replaying
    /// the avatar from the start of the path.
    pub async fn switch_goal(&mut self, goal_id: impl Into<String>, user: UserContext) -> Result<()> {
        self.goal_id = goal_id.into();
        self.user = user;
        self.adventure.reset_initial_animation();
        self.load().await
    }

    pub async fn handle_group_status_update(
        &mut self,
        task_type: TaskType,
        group_index: usize,
        status: bool,
    ) -> UpdateOutcome {
        let update = StatusUpdate {
            task_type,
            goal_id: self.goal_id.clone(),
            group_index,
            status,
        };
        match self.persist_and_resync(&update).await {
            Ok(()) => {
                info!(%task_type, group_index, status, "task group status updated");
                if status {
                    self.notifier.notify(Notification::Success(COMPLETED_MESSAGE.to_string()));
                    self.adventure.advance(self.clock.now_ms());
                    UpdateOutcome::Completed
                } else {
                    self.notifier.notify(Notification::Success(REVERTED_MESSAGE.to_string()));
                    UpdateOutcome::Reverted
                }
            }
            Err(err) => {
                warn!(%task_type, group_index, status, error = %err, "task group status update failed");
                self.notifier.notify(Notification::Failure(FAILURE_MESSAGE.to_string()));
                UpdateOutcome::Failed
            }
        }
    }

    async fn persist_and_resync(&mut self, update: &StatusUpdate) -> Result<()> {
        self.mutator.update_group_status(update, &self.user).await?;
        let goal = self.provider.fetch_goal(&self.goal_id, &self.user).await?;
        self.adventure.load_goal(Some(goal), self.clock.now_ms());
        Ok(())
    }
}
