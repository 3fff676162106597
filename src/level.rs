//! Level model: one level per task group, daily first, then weekly, then monthly.

use serde::Serialize;
use serde_json::Value;

use crate::goal::{Goal, TaskType};

/// A node on the adventure path, derived 1:1 from a task group.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub source_type: TaskType,
    pub source_index: usize,
    pub status: bool,
    pub tasks: Vec<Value>,
}

impl Level {
    /// "Daily 1", "Weekly 2", ...
    pub fn label(&self) -> String {
        format!("{} {}", self.source_type.title(), self.source_index + 1)
    }
}

/// Full rebuild of the ordered level list. An absent goal has no levels.
pub fn build_levels(goal: Option<&Goal>) -> Vec<Level> {
    let Some(goal) = goal else {
        return Vec::new();
    };
    let mut levels = Vec::with_capacity(goal.group_count());
    for task_type in TaskType::ALL {
        for (idx, group) in goal.groups(task_type).iter().enumerate() {
            levels.push(Level {
                source_type: task_type,
                source_index: idx,
                status: group.status,
                tasks: group.tasks.clone(),
            });
        }
    }
    levels
}

pub fn completed_levels(levels: &[Level]) -> usize {
    levels.iter().filter(|l| l.status).count()
}
