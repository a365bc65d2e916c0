//! The commit sequence.

use crate::runner::display_command;
use crate::{CommitSettings, CommitStep};
use coder_core::{Artifact, ArtifactSet};
use coder_error::{CoderResult, CommitError, CommitErrorKind};
use coder_interface::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Lands an artifact set on a fresh branch of the checkout at `code_base`.
///
/// Every subprocess runs with `code_base` as its working directory. The
/// committer takes no lock: callers that share a checkout must serialize
/// [`commit`](Self::commit) calls themselves.
#[derive(Debug, Clone)]
pub struct BranchCommitter<R> {
    runner: R,
    code_base: PathBuf,
    settings: CommitSettings,
}

impl<R: CommandRunner> BranchCommitter<R> {
    /// Create a committer for the checkout at `code_base`.
    pub fn new(runner: R, code_base: impl Into<PathBuf>, settings: CommitSettings) -> Self {
        Self {
            runner,
            code_base: code_base.into(),
            settings,
        }
    }

    /// Root of the checkout.
    pub fn code_base(&self) -> &Path {
        &self.code_base
    }

    /// Active settings.
    pub fn settings(&self) -> &CommitSettings {
        &self.settings
    }

    /// Write the artifacts, format, commit and push to a new branch.
    ///
    /// Returns the branch name. On failure the working tree is left as the
    /// failing step found it.
    #[instrument(skip(self, artifacts), fields(files = artifacts.len()))]
    pub async fn commit(&self, resource_name: &str, artifacts: &ArtifactSet) -> CoderResult<String> {
        let mut branch = String::new();
        for step in CommitStep::ALL {
            debug!(%step, "Running commit step");
            match step {
                CommitStep::ResolveBranch => branch = self.resolve_branch(resource_name).await?,
                CommitStep::ResetWorkspace => self.reset_workspace(&branch).await?,
                CommitStep::Materialize => self.materialize(artifacts).await?,
                CommitStep::Format => self.format().await?,
                CommitStep::CommitAndPush => self.commit_and_push(resource_name, &branch).await?,
            }
        }
        info!(branch = %branch, "Generated code committed and pushed");
        Ok(branch)
    }

    /// First candidate name that exists neither locally nor on the remote.
    #[instrument(skip(self))]
    pub async fn resolve_branch(&self, resource_name: &str) -> CoderResult<String> {
        let attempts = *self.settings.max_branch_attempts();
        for attempt in 0..attempts {
            let candidate = self.settings.branch_name(resource_name, attempt);
            if !self.branch_exists(&candidate).await? {
                info!(branch = %candidate, "Resolved branch name");
                return Ok(candidate);
            }
            debug!(branch = %candidate, "Branch already exists");
        }

        let base = self.settings.branch_name(resource_name, 0);
        warn!(%base, attempts, "No free branch name");
        Err(CommitError::new(CommitErrorKind::BranchResolutionExhausted { base, attempts }).into())
    }

    /// True when `branch` exists on the remote or in the local checkout.
    pub async fn branch_exists(&self, branch: &str) -> CoderResult<bool> {
        let remote = self
            .git(
                CommitStep::ResolveBranch,
                &["ls-remote", "--heads", self.settings.remote().as_str(), branch],
            )
            .await?;
        if remote.has_stdout() {
            return Ok(true);
        }
        let local = self
            .git(CommitStep::ResolveBranch, &["branch", "--list", branch])
            .await?;
        Ok(local.has_stdout())
    }

    async fn reset_workspace(&self, branch: &str) -> CoderResult<()> {
        let step = CommitStep::ResetWorkspace;
        self.git(step, &["config", "user.name", self.settings.user_name().as_str()])
            .await?;
        self.git(step, &["config", "user.email", self.settings.user_email().as_str()])
            .await?;
        self.git(step, &["reset", "--hard"]).await?;
        self.git(step, &["clean", "-f"]).await?;
        match self.settings.base_ref() {
            Some(base) => self.git(step, &["checkout", "-b", branch, base.as_str()]).await?,
            None => self.git(step, &["checkout", "-b", branch]).await?,
        };
        Ok(())
    }

    /// Write every artifact under the code base, creating directories and
    /// overwriting existing files.
    #[instrument(skip_all, fields(code_base = %self.code_base.display()))]
    pub async fn materialize(&self, artifacts: &ArtifactSet) -> CoderResult<()> {
        for artifact in artifacts {
            self.write_artifact(artifact).await?;
        }
        Ok(())
    }

    /// Write one artifact under the code base.
    pub async fn write_artifact(&self, artifact: &Artifact) -> CoderResult<()> {
        let path = artifact.resolve(&self.code_base);
        let write_failed = |e: std::io::Error| {
            CommitError::new(CommitErrorKind::Materialize {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_failed)?;
        }
        tokio::fs::write(&path, artifact.content())
            .await
            .map_err(write_failed)?;
        debug!(path = %artifact.path().display(), "Wrote artifact");
        Ok(())
    }

    async fn format(&self) -> CoderResult<()> {
        for command in self.settings.format_commands() {
            let mut parts = command.split_whitespace();
            let Some(program) = parts.next() else {
                continue;
            };
            let args: Vec<String> = parts.map(str::to_string).collect();
            self.run_checked(CommitStep::Format, program, &args).await?;
        }
        Ok(())
    }

    async fn commit_and_push(&self, resource_name: &str, branch: &str) -> CoderResult<()> {
        let step = CommitStep::CommitAndPush;
        let message = self.settings.commit_message(resource_name);
        self.git(step, &["add", "."]).await?;
        self.git(step, &["commit", "-m", message.as_str()]).await?;
        self.git(step, &["push", "-u", self.settings.remote().as_str(), branch])
            .await?;
        Ok(())
    }

    async fn git(&self, step: CommitStep, args: &[&str]) -> CoderResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.run_checked(step, "git", &args).await
    }

    /// Run a command and turn a non-zero exit into `CommitStepFailed`.
    async fn run_checked(
        &self,
        step: CommitStep,
        program: &str,
        args: &[String],
    ) -> CoderResult<CommandOutput> {
        let output = self.runner.run(program, args, &self.code_base).await?;
        if output.success() {
            return Ok(output);
        }

        let command = display_command(program, args);
        warn!(%step, %command, exit_code = ?output.exit_code(), "Commit step failed");
        Err(CommitError::new(CommitErrorKind::CommitStepFailed {
            step: step.to_string(),
            command,
            exit_code: *output.exit_code(),
            stdout: output.stdout().clone(),
            stderr: output.stderr().clone(),
        })
        .into())
    }
}
