//! Task model and its status domain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Every accepted status, in workflow order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    /// The value stored in the `status` column
    pub fn as_sql(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_sql() == lowered)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// A persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: i64, description: impl Into<String>, status: TaskStatus) -> Self {
        Task {
            id,
            description: description.into(),
            status,
        }
    }

    /// Single-line rendering: `[id] (status) description`
    pub fn summary(&self) -> String {
        format!("[{}] ({}) {}", self.id, self.status, self.description)
    }
}
