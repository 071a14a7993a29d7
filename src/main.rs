//! tasklite CLI - status-constrained task tracking in SQLite

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tasklite::cli::display::error;
use tasklite::cli::{Cli, Outcome, dispatch, exit_code_for};
use tasklite::storage::{DatabaseLocation, StorageEngine, TaskRepository};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error(&e.to_string());
            exit_code_for(&e)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<Outcome> {
    let location = DatabaseLocation::resolve(cli.db.as_deref())?;
    let engine = StorageEngine::new(location.path);
    log::debug!("Using database {:?} ({:?})", engine.path(), location.source);

    engine.initialize()?;

    let repo = TaskRepository::new(engine);
    dispatch(cli.command, &repo)
}
