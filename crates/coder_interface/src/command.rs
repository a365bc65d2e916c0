//! Captured subprocess results.

/// Exit status and captured output of a finished subprocess.
///
/// # Examples
///
/// ```
/// use coder_interface::CommandOutput;
///
/// let ok = CommandOutput::new(Some(0), "abc123\trefs/heads/main\n", "");
/// assert!(ok.success());
/// assert!(ok.has_stdout());
///
/// let killed = CommandOutput::new(None, "", "");
/// assert!(!killed.success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_getters::Getters)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    exit_code: Option<i32>,
    /// Captured standard output
    stdout: String,
    /// Captured standard error
    stderr: String,
}

impl CommandOutput {
    /// Create a command output.
    pub fn new(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Successful exit with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(Some(0), stdout, "")
    }

    /// Failed exit with the given code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(Some(exit_code), "", stderr)
    }

    /// True when the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// True when stdout holds anything besides whitespace.
    pub fn has_stdout(&self) -> bool {
        !self.stdout.trim().is_empty()
    }
}
