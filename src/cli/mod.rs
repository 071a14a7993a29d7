//! Command-line front end

pub mod commands;
pub mod dispatch;
pub mod display;
pub mod outcome;

pub use commands::{Cli, Commands};
pub use dispatch::dispatch;
pub use outcome::{Outcome, exit_code_for};
