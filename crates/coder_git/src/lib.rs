//! Branch-safe commit automation.
//!
//! Generated files are always landed on a fresh branch whose name does not
//! exist locally or on `origin`. The work is an explicit sequence of
//! [`CommitStep`]s run by [`BranchCommitter`]; any failing subprocess stops
//! the sequence and is reported with its step, command line, exit code and
//! captured output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod committer;
mod runner;
mod settings;
mod step;

pub use committer::BranchCommitter;
pub use runner::TokioCommandRunner;
pub use settings::{CommitSettings, CommitSettingsBuilder};
pub use step::CommitStep;
