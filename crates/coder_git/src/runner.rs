//! Subprocess runner backed by `tokio::process`.

use async_trait::async_trait;
use coder_error::{CoderResult, CommitError, CommitErrorKind};
use coder_interface::{CommandOutput, CommandRunner};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs real processes and captures their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    #[instrument(skip(self, cwd), fields(cwd = %cwd.display()))]
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> CoderResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                CommitError::new(CommitErrorKind::Spawn {
                    command: display_command(program, args),
                    message: e.to_string(),
                })
            })?;

        let result = CommandOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        debug!(exit_code = ?result.exit_code(), "Command finished");
        Ok(result)
    }
}

/// `program arg1 arg2` for logs and errors.
pub(crate) fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
