//! Persistence contract for tasks and an in-memory implementation.

use crate::types::{NewTask, Task, TaskId};
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Row storage keyed by a store-assigned integer id.
///
/// Absence is reported as `None`, never as an error. Errors are reserved for
/// the backend itself failing.
pub trait TaskStore: Send + Sync {
    /// All tasks, in ascending id order.
    fn find_all(&self) -> Result<Vec<Task>>;

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>>;

    /// Persist a task that has no id yet. The store assigns a fresh id that
    /// has never been handed out before.
    fn insert(&self, task: &NewTask) -> Result<Task>;

    /// Overwrite the row with `task.id` entirely, inserting it if absent.
    fn save(&self, task: &Task) -> Result<Task>;

    /// Remove the row. Removing an absent id is a no-op.
    fn delete_by_id(&self, id: TaskId) -> Result<()>;
}

#[derive(Default)]
struct MemoryInner {
    tasks: BTreeMap<TaskId, Task>,
    last_id: TaskId,
}

/// `TaskStore` backed by a map, for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryTaskStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("task store lock poisoned"))
    }
}

impl TaskStore for MemoryTaskStore {
    fn find_all(&self) -> Result<Vec<Task>> {
        Ok(self.lock()?.tasks.values().cloned().collect())
    }

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.lock()?.tasks.get(&id).cloned())
    }

    fn insert(&self, task: &NewTask) -> Result<Task> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let stored = Task {
            id: inner.last_id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
        };
        inner.tasks.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn save(&self, task: &Task) -> Result<Task> {
        let mut inner = self.lock()?;
        // Mirror AUTOINCREMENT: explicit ids push the sequence forward.
        inner.last_id = inner.last_id.max(task.id);
        inner.tasks.insert(task.id, task.clone());
        Ok(task.clone())
    }

    fn delete_by_id(&self, id: TaskId) -> Result<()> {
        self.lock()?.tasks.remove(&id);
        Ok(())
    }
}
