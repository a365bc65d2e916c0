//! Commit sequence steps.

/// One step of the commit sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommitStep {
    /// Find a branch name that is free locally and on the remote
    #[display("resolve_branch")]
    ResolveBranch,
    /// Set the committer identity, discard local changes, create the branch
    #[display("reset_workspace")]
    ResetWorkspace,
    /// Write the generated files
    #[display("materialize")]
    Materialize,
    /// Run the project's code generators and formatters
    #[display("format")]
    Format,
    /// Stage, commit and push
    #[display("commit_and_push")]
    CommitAndPush,
}

impl CommitStep {
    /// All steps in execution order.
    pub const ALL: [CommitStep; 5] = [
        CommitStep::ResolveBranch,
        CommitStep::ResetWorkspace,
        CommitStep::Materialize,
        CommitStep::Format,
        CommitStep::CommitAndPush,
    ];
}
