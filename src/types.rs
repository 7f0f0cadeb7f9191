//! Core types for the task store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// Current local time, the clock every new task is stamped with.
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Overwrite the mutable fields from a request payload.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = input.description;
        self.completed = input.completed;
    }
}

/// A task that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl NewTask {
    /// Create an open task stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            created_at: now_local(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl From<TaskInput> for NewTask {
    fn from(input: TaskInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now_local(),
        }
    }
}

/// Request body for creating or updating a task.
///
/// Unknown fields such as `id` and `createdAt` are ignored, since both are
/// owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }
}
