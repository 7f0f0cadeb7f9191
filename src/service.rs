//! Task service: existence checks between the HTTP layer and the store.

use crate::error::{TaskError, TaskResult};
use crate::store::TaskStore;
use crate::types::{NewTask, Task, TaskId, TaskInput};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(self.store.find_all()?)
    }

    pub fn get_task_by_id(&self, id: TaskId) -> TaskResult<Option<Task>> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Store a new task and return it with its assigned id.
    pub fn save_task(&self, task: NewTask) -> TaskResult<Task> {
        let task = self.store.insert(&task)?;
        debug!(task_id = task.id, "Created task");
        Ok(task)
    }

    /// Write an already-identified task straight through to the store.
    pub fn save_existing(&self, task: &Task) -> TaskResult<Task> {
        Ok(self.store.save(task)?)
    }

    /// Delete a task, failing with `NotFound` if it does not exist.
    pub fn delete_task(&self, id: TaskId) -> TaskResult<()> {
        self.require(id)?;
        self.store.delete_by_id(id)?;
        debug!(task_id = id, "Deleted task");
        Ok(())
    }

    /// Copy title, description and completed onto the stored task.
    ///
    /// `id` and `created_at` keep their stored values. Fails with `NotFound`
    /// if the task does not exist, in which case nothing is written.
    pub fn update_task(&self, id: TaskId, input: TaskInput) -> TaskResult<Task> {
        let mut task = self.require(id)?;
        task.apply(input);
        let task = self.store.save(&task)?;
        debug!(task_id = id, "Updated task");
        Ok(task)
    }

    fn require(&self, id: TaskId) -> TaskResult<Task> {
        self.store.find_by_id(id)?.ok_or(TaskError::NotFound(id))
    }
}
