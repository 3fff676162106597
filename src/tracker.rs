//! Task completion tracking and star ratings.
//!
//! The map is UI-derived, never authoritative: lookups on unknown groups or slots
//! fall back to "nothing completed" instead of failing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::goal::{Goal, TaskType};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompletionCount {
    pub completed: usize,
    pub total: usize,
}

pub type SlotMap = BTreeMap<usize, bool>;

/// Per-cadence map of group index -> (task slot -> completed).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskStateMap {
    daily: BTreeMap<usize, SlotMap>,
    weekly: BTreeMap<usize, SlotMap>,
    monthly: BTreeMap<usize, SlotMap>,
}

impl TaskStateMap {
    /// Builds the whole map from scratch. Every slot starts at its group's flag.
    pub fn initialize(goal: Option<&Goal>) -> Self {
        let mut map = Self::default();
        let Some(goal) = goal else {
            return map;
        };
        for task_type in TaskType::ALL {
            let groups = map.cadence_mut(task_type);
            for (group_idx, group) in goal.groups(task_type).iter().enumerate() {
                let slots: SlotMap = (0..group.tasks.len()).map(|i| (i, group.status)).collect();
                groups.insert(group_idx, slots);
            }
        }
        map
    }

    fn cadence(&self, task_type: TaskType) -> &BTreeMap<usize, SlotMap> {
        match task_type {
            TaskType::Daily => &self.daily,
            TaskType::Weekly => &self.weekly,
            TaskType::Monthly => &self.monthly,
        }
    }

    fn cadence_mut(&mut self, task_type: TaskType) -> &mut BTreeMap<usize, SlotMap> {
        match task_type {
            TaskType::Daily => &mut self.daily,
            TaskType::Weekly => &mut self.weekly,
            TaskType::Monthly => &mut self.monthly,
        }
    }

    /// Slot map of one group, `None` when the group is unknown. All absence
    /// defaults below go through here.
    pub fn group(&self, task_type: TaskType, group_index: usize) -> Option<&SlotMap> {
        self.cadence(task_type).get(&group_index)
    }

    pub fn completion_count(&self, task_type: TaskType, group_index: usize) -> CompletionCount {
        self.group(task_type, group_index)
            .map(|slots| CompletionCount {
                completed: slots.values().filter(|done| **done).count(),
                total: slots.len(),
            })
            .unwrap_or_default()
    }

    pub fn is_task_completed(&self, task_type: TaskType, group_index: usize, task_index: usize) -> bool {
        self.group(task_type, group_index)
            .and_then(|slots| slots.get(&task_index).copied())
            .unwrap_or(false)
    }

    pub fn star_rating(&self, task_type: TaskType, group_index: usize) -> u8 {
        let count = self.completion_count(task_type, group_index);
        star_rating(count.completed, count.total)
    }
}

/// 0..=3 stars from a completion ratio. 66 and 33 are inclusive lower bounds.
pub fn star_rating(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percentage = completed as f64 / total as f64 * 100.0;
    if percentage >= 100.0 {
        3
    } else if percentage >= 66.0 {
        2
    } else if percentage >= 33.0 {
        1
    } else {
        0
    }
}
