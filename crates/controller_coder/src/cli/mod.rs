//! Command-line interface for the controller-coder binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands, InputArgs, OutputArgs};
pub use handlers::run_command;
