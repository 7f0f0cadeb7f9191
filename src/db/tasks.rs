//! Task CRUD queries.

use super::Database;
use crate::store::TaskStore;
use crate::types::{NewTask, Task, TaskId};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: TaskId = row.get("id")?;
    let title: String = row.get("title")?;
    let description: Option<String> = row.get("description")?;
    let completed: bool = row.get("completed")?;
    let created_at = row.get("created_at")?;

    Ok(Task {
        id,
        title,
        description,
        completed,
        created_at,
    })
}

/// Fetch a task using an existing connection.
fn get_task_internal(conn: &Connection, id: TaskId) -> Result<Option<Task>> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;
    let task = stmt.query_row(params![id], parse_task_row).optional()?;
    Ok(task)
}

impl Database {
    /// List every task in storage order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, id))
    }

    /// Insert a new row and return it with its assigned id.
    pub fn insert_task(&self, task: &NewTask) -> Result<Task> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![task.title, task.description, task.completed, task.created_at],
            )?;

            Ok(Task {
                id: conn.last_insert_rowid(),
                title: task.title.clone(),
                description: task.description.clone(),
                completed: task.completed,
                created_at: task.created_at,
            })
        })
    }

    /// Write every column of `task` to the row with its id, inserting the row
    /// if it does not exist.
    pub fn upsert_task(&self, task: &Task) -> Result<Task> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (id, title, description, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                     title = excluded.title,
                     description = excluded.description,
                     completed = excluded.completed,
                     created_at = excluded.created_at",
                params![
                    task.id,
                    task.title,
                    task.description,
                    task.completed,
                    task.created_at
                ],
            )?;
            Ok(task.clone())
        })
    }

    /// Delete a task. Returns whether a row was removed.
    pub fn delete_task(&self, id: TaskId) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
            Ok(count)
        })
    }
}

impl TaskStore for Database {
    fn find_all(&self) -> Result<Vec<Task>> {
        self.list_tasks()
    }

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        self.get_task(id)
    }

    fn insert(&self, task: &NewTask) -> Result<Task> {
        self.insert_task(task)
    }

    fn save(&self, task: &Task) -> Result<Task> {
        self.upsert_task(task)
    }

    fn delete_by_id(&self, id: TaskId) -> Result<()> {
        self.delete_task(id)?;
        Ok(())
    }
}
