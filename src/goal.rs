//! Goal documents as returned by the REST layer.
//!
//! A goal bundles task groups under three cadences. Tasks themselves are opaque to
//! the progression engine: they are only counted, so they are kept as raw JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Cadence of a task group. Declaration order is level order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Daily,
    Weekly,
    Monthly,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Daily, TaskType::Weekly, TaskType::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Daily => "daily",
            TaskType::Weekly => "weekly",
            TaskType::Monthly => "monthly",
        }
    }

    /// Capitalized name used in level labels.
    pub fn title(self) -> &'static str {
        match self {
            TaskType::Daily => "Daily",
            TaskType::Weekly => "Weekly",
            TaskType::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(TaskType::Daily),
            "weekly" => Ok(TaskType::Weekly),
            "monthly" => Ok(TaskType::Monthly),
            other => Err(Error::UnknownTaskType(other.to_string())),
        }
    }
}

/// One bundle of tasks sharing a single group-level completion flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub tasks: Vec<Value>,
}

impl TaskGroup {
    pub fn new(status: bool, task_count: usize) -> Self {
        Self {
            status,
            tasks: vec![Value::Null; task_count],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GoalDocument")]
pub struct Goal {
    /// Empty when the document carried no identifier.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub daily: Vec<TaskGroup>,
    #[serde(default)]
    pub weekly: Vec<TaskGroup>,
    #[serde(default)]
    pub monthly: Vec<TaskGroup>,
}

/// Wire shape. Mongo documents carry `_id`, serialized models may add a
/// virtual `id` next to it; `_id` wins when both are present.
#[derive(Deserialize)]
struct GoalDocument {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    daily: Vec<TaskGroup>,
    #[serde(default)]
    weekly: Vec<TaskGroup>,
    #[serde(default)]
    monthly: Vec<TaskGroup>,
}

impl From<GoalDocument> for Goal {
    fn from(doc: GoalDocument) -> Self {
        Goal {
            id: doc.mongo_id.or(doc.id).unwrap_or_default(),
            title: doc.title,
            daily: doc.daily,
            weekly: doc.weekly,
            monthly: doc.monthly,
        }
    }
}

impl Goal {
    /// Whether this goal and `other` are known to be the same document. Goals
    /// without an id never match.
    pub fn same_identity(&self, other: &Goal) -> bool {
        !self.id.is_empty() && self.id == other.id
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn groups(&self, task_type: TaskType) -> &[TaskGroup] {
        match task_type {
            TaskType::Daily => &self.daily,
            TaskType::Weekly => &self.weekly,
            TaskType::Monthly => &self.monthly,
        }
    }

    pub fn group(&self, task_type: TaskType, index: usize) -> Option<&TaskGroup> {
        self.groups(task_type).get(index)
    }

    pub fn group_count(&self) -> usize {
        TaskType::ALL.iter().map(|t| self.groups(*t).len()).sum()
    }
}
