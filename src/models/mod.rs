//! Data models for tasklite

pub mod task;

pub use task::{Task, TaskStatus};
