//! Branch-safe commit errors.

/// Commit automation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommitErrorKind {
    /// A subprocess in the commit sequence exited non-zero.
    #[display(
        "Step '{}' failed: `{}` exited with {}\nstdout:\n{}\nstderr:\n{}",
        step,
        command,
        exit_code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()),
        stdout,
        stderr
    )]
    CommitStepFailed {
        /// Commit step that was running
        step: String,
        /// The command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },
    /// No free branch name was found within the attempt budget.
    #[display("No free branch name for '{}' after {} attempts", base, attempts)]
    BranchResolutionExhausted {
        /// Base branch name
        base: String,
        /// Number of names checked
        attempts: usize,
    },
    /// A subprocess could not be started at all.
    #[display("Failed to spawn `{}`: {}", command, message)]
    Spawn {
        /// The command line
        command: String,
        /// OS error message
        message: String,
    },
    /// A generated file could not be written.
    #[display("Failed to write {}: {}", path, message)]
    Materialize {
        /// Destination path
        path: String,
        /// OS error message
        message: String,
    },
}

/// Commit error with location tracking.
///
/// # Examples
///
/// ```
/// use coder_error::{CommitError, CommitErrorKind};
///
/// let err = CommitError::new(CommitErrorKind::CommitStepFailed {
///     step: "format".to_string(),
///     command: "make fmt".to_string(),
///     exit_code: Some(2),
///     stdout: String::new(),
///     stderr: "gofmt: syntax error".to_string(),
/// });
/// let text = format!("{}", err);
/// assert!(text.contains("make fmt"));
/// assert!(text.contains("gofmt: syntax error"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Commit Error: {} at line {} in {}", kind, line, file)]
pub struct CommitError {
    /// The specific error condition
    pub kind: CommitErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CommitError {
    /// Create a new CommitError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
