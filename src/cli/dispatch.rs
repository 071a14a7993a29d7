//! Runs one parsed command against the task repository

use crate::cli::commands::Commands;
use crate::cli::display::{display_task_detail, display_task_list, not_found, success};
use crate::cli::outcome::Outcome;
use crate::storage::TaskRepository;
use anyhow::Result;

/// Execute exactly one repository operation and print its result
pub fn dispatch(command: Commands, repo: &TaskRepository) -> Result<Outcome> {
    match command {
        Commands::Add {
            description,
            status,
        } => {
            let task = repo.add(&description, &status)?;
            success(&format!("Added: {}", task.summary()));
        }

        Commands::List { json } => {
            let tasks = repo.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                display_task_list(&tasks);
            }
        }

        Commands::Show { id, json } => {
            let Some(task) = repo.get(id)? else {
                not_found(id);
                return Ok(Outcome::NotFound(id));
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                display_task_detail(&task);
            }
        }

        Commands::Update {
            id,
            description,
            status,
        } => {
            let Some(task) = repo.update(id, &description, &status)? else {
                not_found(id);
                return Ok(Outcome::NotFound(id));
            };
            success(&format!("Updated: {}", task.summary()));
        }

        Commands::Done { id } => {
            let Some(task) = repo.complete(id)? else {
                not_found(id);
                return Ok(Outcome::NotFound(id));
            };
            success(&format!("Completed: {}", task.summary()));
        }
    }

    Ok(Outcome::Success)
}
