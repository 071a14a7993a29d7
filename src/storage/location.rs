//! Database file location resolution

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the database path
pub const DB_ENV_VAR: &str = "TASK_DB";

/// Database file name used when nothing else is configured
const DEFAULT_DB_NAME: &str = "tasks.db";

/// Errors related to locating the database
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to access home directory")]
    NoHomeDirectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the task database lives, and how that was decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocation {
    pub path: PathBuf,
    pub source: LocationSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Passed on the command line
    Explicit,
    /// Taken from `TASK_DB`
    Environment,
    /// `tasks.db` in the working directory
    Default,
}

impl DatabaseLocation {
    /// Resolve against the process environment and current directory.
    ///
    /// Precedence: `explicit`, then `TASK_DB`, then `./tasks.db`.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LocationError> {
        let cwd = std::env::current_dir()?;
        let env = std::env::var(DB_ENV_VAR).ok();
        Self::resolve_from(explicit, env.as_deref(), &cwd)
    }

    /// Resolve from explicit inputs, without reading process state
    pub fn resolve_from(
        explicit: Option<&Path>,
        env_value: Option<&str>,
        cwd: &Path,
    ) -> Result<Self, LocationError> {
        if let Some(path) = explicit {
            return Ok(DatabaseLocation {
                path: absolutize(expand_home(&path.to_string_lossy())?, cwd),
                source: LocationSource::Explicit,
            });
        }

        if let Some(value) = env_value
            && !value.trim().is_empty()
        {
            return Ok(DatabaseLocation {
                path: absolutize(expand_home(value.trim())?, cwd),
                source: LocationSource::Environment,
            });
        }

        Ok(DatabaseLocation {
            path: cwd.join(DEFAULT_DB_NAME),
            source: LocationSource::Default,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(raw: &str) -> Result<PathBuf, LocationError> {
    if raw == "~" {
        return dirs::home_dir().ok_or(LocationError::NoHomeDirectory);
    }

    if let Some(rest) = raw.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(LocationError::NoHomeDirectory)?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(raw))
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
