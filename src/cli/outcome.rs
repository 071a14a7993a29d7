//! Mapping of command results to process exit codes

use crate::storage::{LocationError, StorageError, TaskError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_STORAGE: i32 = 3;
pub const EXIT_FAILURE: i32 = 4;

/// Result of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound(i64),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => EXIT_SUCCESS,
            Outcome::NotFound(_) => EXIT_NOT_FOUND,
        }
    }
}

/// Exit code for a command that failed
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(task_err) = err.downcast_ref::<TaskError>() {
        return match task_err {
            TaskError::InvalidStatus(_) | TaskError::EmptyDescription => EXIT_USAGE,
            TaskError::InvalidOperation(_) => EXIT_NOT_FOUND,
            TaskError::Storage(_) => EXIT_STORAGE,
        };
    }

    if err.downcast_ref::<StorageError>().is_some() || err.downcast_ref::<LocationError>().is_some()
    {
        return EXIT_STORAGE;
    }

    EXIT_FAILURE
}
