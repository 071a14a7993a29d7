//! CRUD operations over task rows

use crate::models::{Task, TaskStatus};
use crate::storage::engine::{StorageEngine, StorageError};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, params};
use thiserror::Error;

const SELECT_TASKS: &str = "SELECT id, description, status FROM tasks";

/// Errors returned by repository operations
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid status '{0}' (expected one of: todo, doing, done)")]
    InvalidStatus(String),
    #[error("Task description must not be empty")]
    EmptyDescription,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Task repository backed by a [`StorageEngine`].
///
/// Every write validates its input before a connection is opened, so a
/// rejected call never leaves a partial row behind.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    engine: StorageEngine,
}

impl TaskRepository {
    pub fn new(engine: StorageEngine) -> Self {
        TaskRepository { engine }
    }

    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    /// Persist a new task and return it with its assigned id
    pub fn add(&self, description: &str, status: &str) -> Result<Task, TaskError> {
        let status = parse_status(status)?;
        if description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }

        let id = self.engine.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO tasks(description, status) VALUES (?1, ?2)",
                params![description, status.as_sql()],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        log::debug!("Inserted task {} ({})", id, status);
        Ok(Task::new(id, description, status))
    }

    /// All tasks in ascending id order
    pub fn list(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = self.engine.with_transaction(|tx| {
            let mut stmt = tx.prepare(&format!("{} ORDER BY id ASC", SELECT_TASKS))?;
            let rows = stmt.query_map([], task_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;
        Ok(tasks)
    }

    /// Look up a task by id. A missing id is `Ok(None)`, not an error.
    pub fn get(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let task = self.engine.with_transaction(|tx| {
            tx.query_row(
                &format!("{} WHERE id = ?1", SELECT_TASKS),
                params![id],
                task_from_row,
            )
            .optional()
        })?;
        Ok(task)
    }

    /// Overwrite both description and status of an existing task.
    ///
    /// Returns the refreshed task, or `Ok(None)` when no row has this id.
    /// Any valid status may replace any other; there is no transition guard.
    pub fn update(
        &self,
        id: i64,
        description: &str,
        status: &str,
    ) -> Result<Option<Task>, TaskError> {
        let status = parse_status(status)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }

        self.write(id, description, status)
    }

    /// Mark a task done, keeping its current description.
    ///
    /// Composes [`get`](Self::get) and a write of the stored description with
    /// status `done`. An unknown id short-circuits to `Ok(None)` before any
    /// write. If the row disappears between the two steps the call fails with
    /// [`TaskError::InvalidOperation`].
    pub fn complete(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let current = self.get(id)?;
        self.complete_from(id, current)
    }

    fn complete_from(&self, id: i64, current: Option<Task>) -> Result<Option<Task>, TaskError> {
        let Some(current) = current else {
            return Ok(None);
        };

        self.write(current.id, &current.description, TaskStatus::Done)?
            .map(Some)
            .ok_or_else(|| {
                TaskError::InvalidOperation(format!(
                    "task {} was removed before it could be completed",
                    id
                ))
            })
    }

    /// Overwrite a row with already validated values
    fn write(
        &self,
        id: i64,
        description: &str,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskError> {
        let task = self.engine.with_transaction(|tx| {
            let changed = tx.execute(
                "UPDATE tasks SET description = ?1, status = ?2 WHERE id = ?3",
                params![description, status.as_sql(), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            tx.query_row(
                &format!("{} WHERE id = ?1", SELECT_TASKS),
                params![id],
                task_from_row,
            )
            .optional()
        })?;

        match &task {
            Some(t) => log::debug!("Updated task {} ({})", t.id, t.status),
            None => log::debug!("No task with id {} to update", id),
        }
        Ok(task)
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, TaskError> {
    raw.parse()
        .map_err(|_| TaskError::InvalidStatus(raw.to_string()))
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let status_str: String = row.get("status")?;
    let status = status_str.parse::<TaskStatus>().map_err(|e| {
        let index = row.as_ref().column_index("status").unwrap_or(2);
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into())
    })?;

    Ok(Task {
        id: row.get("id")?,
        description: row.get("description")?,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, TaskRepository) {
        let temp = TempDir::new().unwrap();
        let engine = StorageEngine::new(temp.path().join("tasks.db"));
        engine.initialize().unwrap();
        (temp, TaskRepository::new(engine))
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_temp, repo) = setup_repo();

        let first = repo.add("first", "todo").unwrap();
        let second = repo.add("second", "doing").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.status, TaskStatus::Doing);
    }

    #[test]
    fn test_add_normalizes_status_case() {
        let (_temp, repo) = setup_repo();

        for (i, raw) in ["TODO", "Doing", "dOnE", "todo"].iter().enumerate() {
            let task = repo.add(&format!("task {}", i), raw).unwrap();
            let stored = repo.get(task.id).unwrap().unwrap();
            assert_eq!(stored.status.as_sql(), raw.to_lowercase());
        }
    }

    #[test]
    fn test_add_invalid_status_leaves_store_unchanged() {
        let (_temp, repo) = setup_repo();
        repo.add("keep", "todo").unwrap();

        for raw in ["maybe", "", "finished", "to do"] {
            match repo.add("x", raw) {
                Err(TaskError::InvalidStatus(s)) => assert_eq!(s, raw),
                other => panic!("expected InvalidStatus, got {:?}", other),
            }
        }

        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_status_does_not_touch_storage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("never.db");
        let repo = TaskRepository::new(StorageEngine::new(&path));

        assert!(matches!(
            repo.add("x", "maybe"),
            Err(TaskError::InvalidStatus(_))
        ));
        assert!(matches!(
            repo.update(1, "x", "maybe"),
            Err(TaskError::InvalidStatus(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_add_rejects_blank_description() {
        let (_temp, repo) = setup_repo();

        assert!(matches!(
            repo.add("   ", "todo"),
            Err(TaskError::EmptyDescription)
        ));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_empty() {
        let (_temp, repo) = setup_repo();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_has_no_gaps_after_failed_adds() {
        let (_temp, repo) = setup_repo();

        repo.add("one", "todo").unwrap();
        assert!(repo.add("bad", "nope").is_err());
        repo.add("two", "doing").unwrap();
        assert!(repo.add("", "todo").is_err());
        repo.add("three", "done").unwrap();

        let tasks = repo.list().unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(tasks[2].description, "three");
    }

    #[test]
    fn test_get_round_trip() {
        let (_temp, repo) = setup_repo();

        let created = repo.add("  padded stays padded ", "Doing").unwrap();
        let read = repo.get(created.id).unwrap().unwrap();

        assert_eq!(read, created);
        assert_eq!(read.description, "  padded stays padded ");
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_temp, repo) = setup_repo();
        assert!(repo.get(42).unwrap().is_none());
    }

    #[test]
    fn test_update_rewrites_both_fields() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("draft", "todo").unwrap();

        let updated = repo
            .update(created.id, "  final  ", "DOING")
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "final");
        assert_eq!(updated.status, TaskStatus::Doing);
        assert_eq!(repo.get(created.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let (_temp, repo) = setup_repo();
        repo.add("a", "todo").unwrap();
        repo.add("b", "done").unwrap();
        let before = repo.list().unwrap();

        assert!(repo.update(99, "ghost", "doing").unwrap().is_none());
        assert_eq!(repo.list().unwrap(), before);
    }

    #[test]
    fn test_update_invalid_status_leaves_row_unchanged() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("stable", "doing").unwrap();

        assert!(matches!(
            repo.update(created.id, "changed", "Later"),
            Err(TaskError::InvalidStatus(_))
        ));
        assert_eq!(repo.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn test_update_is_idempotent() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("repeat", "todo").unwrap();

        let once = repo.update(created.id, "repeat me", "done").unwrap();
        let state_once = repo.list().unwrap();
        let twice = repo.update(created.id, "repeat me", "done").unwrap();

        assert_eq!(once, twice);
        assert_eq!(repo.list().unwrap(), state_once);
    }

    #[test]
    fn test_update_has_no_transition_guard() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("reopen me", "done").unwrap();

        let reopened = repo.update(created.id, "reopen me", "todo").unwrap().unwrap();
        assert_eq!(reopened.status, TaskStatus::Todo);

        let skipped = repo.update(created.id, "reopen me", "done").unwrap().unwrap();
        assert_eq!(skipped.status, TaskStatus::Done);
    }

    #[test]
    fn test_complete_keeps_description() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("finish docs", "doing").unwrap();

        let done = repo.complete(created.id).unwrap().unwrap();
        assert_eq!(done.description, "finish docs");
        assert_eq!(done.status, TaskStatus::Done);
    }

    #[test]
    fn test_complete_keeps_padded_description() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("  padded  ", "todo").unwrap();

        let done = repo.complete(created.id).unwrap().unwrap();
        assert_eq!(done.description, "  padded  ");
        assert_eq!(repo.get(created.id).unwrap().unwrap().description, "  padded  ");
    }

    #[test]
    fn test_complete_fails_when_row_vanishes() {
        let (_temp, repo) = setup_repo();
        let created = repo.add("short lived", "doing").unwrap();
        let snapshot = repo.get(created.id).unwrap();

        repo.engine()
            .with_transaction(|tx| {
                tx.execute("DELETE FROM tasks WHERE id = ?1", params![created.id])
            })
            .unwrap();

        match repo.complete_from(created.id, snapshot) {
            Err(TaskError::InvalidOperation(msg)) => assert!(msg.contains("removed")),
            other => panic!("expected InvalidOperation, got {:?}", other),
        }
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_status_with_surrounding_whitespace_is_rejected() {
        let (_temp, repo) = setup_repo();

        assert!(matches!(
            repo.add("x", " done "),
            Err(TaskError::InvalidStatus(_))
        ));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_complete_missing_short_circuits() {
        let (_temp, repo) = setup_repo();
        repo.add("other", "todo").unwrap();
        let before = repo.list().unwrap();

        assert!(repo.complete(7).unwrap().is_none());
        assert_eq!(repo.list().unwrap(), before);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (_temp, repo) = setup_repo();
        let first = repo.add("one", "todo").unwrap();

        repo.engine()
            .with_transaction(|tx| tx.execute("DELETE FROM tasks WHERE id = ?1", params![first.id]))
            .unwrap();

        let next = repo.add("two", "todo").unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_storage_unavailable_is_distinct_from_validation() {
        let temp = TempDir::new().unwrap();
        let engine = StorageEngine::new(temp.path().join("nope").join("tasks.db"));
        let repo = TaskRepository::new(engine);

        match repo.list() {
            Err(TaskError::Storage(e)) => assert!(e.is_unavailable()),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_walkthrough() {
        let (_temp, repo) = setup_repo();

        let task = repo.add("write spec", "todo").unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, TaskStatus::Todo);

        let updated = repo.update(1, "write spec", "Done").unwrap().unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.status, TaskStatus::Done);

        assert!(repo.get(2).unwrap().is_none());

        assert!(matches!(
            repo.add("x", "maybe"),
            Err(TaskError::InvalidStatus(_))
        ));
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
