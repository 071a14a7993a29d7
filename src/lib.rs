//! tasklite - status-constrained task tracking backed by SQLite
//!
//! This library provides the task record, a storage engine that owns the
//! SQLite schema and hands out one connection per operation, and a task
//! repository enforcing the `todo`/`doing`/`done` status domain.

pub mod cli;
pub mod models;
pub mod storage;

pub use models::{Task, TaskStatus};
pub use storage::{DatabaseLocation, StorageEngine, StorageError, TaskError, TaskRepository};
