//! Storage layer: database location, engine and task repository

pub mod engine;
pub mod location;
pub mod repository;

pub use engine::{StorageEngine, StorageError};
pub use location::{DB_ENV_VAR, DatabaseLocation, LocationError, LocationSource};
pub use repository::{TaskError, TaskRepository};
