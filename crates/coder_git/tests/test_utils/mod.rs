//! A fake `git`/`make` runner that simulates a checkout and its remote.

#![allow(dead_code)]

use async_trait::async_trait;
use coder_core::ArtifactSet;
use coder_error::CoderResult;
use coder_interface::{CommandOutput, CommandRunner};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct RepoState {
    local: HashSet<String>,
    remote: HashMap<String, Vec<String>>,
    local_commits: HashMap<String, Vec<String>>,
    current: Option<String>,
    fail_prefix: Option<String>,
    log: Vec<String>,
    argv: Vec<(String, Vec<String>)>,
}

/// Simulated repository: local branches, remote branches with commit
/// messages, and a log of every command line.
#[derive(Debug, Default)]
pub struct FakeGit {
    state: Mutex<RepoState>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_branch(self, branch: &str) -> Self {
        self.state.lock().unwrap().local.insert(branch.to_string());
        self
    }

    pub fn with_remote_branch(self, branch: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .remote
            .insert(branch.to_string(), vec!["initial".to_string()]);
        self
    }

    /// Make every command line starting with `prefix` exit with status 2.
    pub fn fail_on(&self, prefix: &str) {
        self.state.lock().unwrap().fail_prefix = Some(prefix.to_string());
    }

    pub fn clear_failure(&self) {
        self.state.lock().unwrap().fail_prefix = None;
    }

    pub fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn remote_commits(&self, branch: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .remote
            .get(branch)
            .cloned()
            .unwrap_or_default()
    }

    /// Argument vectors of every invocation of `program`, in order.
    pub fn args_of(&self, program: &str) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .argv
            .iter()
            .filter(|(p, _)| p == program)
            .map(|(_, args)| args.clone())
            .collect()
    }

    pub fn ran(&self, prefix: &str) -> bool {
        self.log().iter().any(|line| line.starts_with(prefix))
    }
}

#[async_trait]
impl CommandRunner for FakeGit {
    async fn run(&self, program: &str, args: &[String], _cwd: &Path) -> CoderResult<CommandOutput> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        let mut state = self.state.lock().unwrap();
        state.log.push(line.clone());
        state.argv.push((program.to_string(), args.to_vec()));

        if let Some(prefix) = &state.fail_prefix {
            if line.starts_with(prefix.as_str()) {
                return Ok(CommandOutput::new(Some(2), "", format!("{} failed", line)));
            }
        }

        if program != "git" {
            return Ok(CommandOutput::ok(""));
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = match args.as_slice() {
            ["ls-remote", "--heads", _, branch] => {
                if state.remote.contains_key(*branch) {
                    CommandOutput::ok(format!("0123abcd\trefs/heads/{}\n", branch))
                } else {
                    CommandOutput::ok("")
                }
            }
            ["branch", "--list", branch] => {
                if state.local.contains(*branch) {
                    CommandOutput::ok(format!("  {}\n", branch))
                } else {
                    CommandOutput::ok("")
                }
            }
            ["checkout", "-b", branch, ..] => {
                if state.local.contains(*branch) {
                    CommandOutput::failed(
                        128,
                        format!("fatal: a branch named '{}' already exists", branch),
                    )
                } else {
                    state.local.insert(branch.to_string());
                    state.current = Some(branch.to_string());
                    CommandOutput::ok("")
                }
            }
            ["commit", "-m", message] => {
                let current = state.current.clone().unwrap_or_default();
                state
                    .local_commits
                    .entry(current)
                    .or_default()
                    .push(message.to_string());
                CommandOutput::ok("")
            }
            ["push", "-u", _, branch] => {
                let commits = state
                    .local_commits
                    .get(*branch)
                    .cloned()
                    .unwrap_or_default();
                state.remote.insert(branch.to_string(), commits);
                CommandOutput::ok("")
            }
            _ => CommandOutput::ok(""),
        };
        Ok(output)
    }
}

pub fn sample_artifacts(resource_name: &str) -> ArtifactSet {
    ArtifactSet::assemble(
        resource_name,
        "package v1\n",
        "package storage\n\ntype Storage interface{}\n",
        "package storage\n\ntype postgrestStorage struct{}\n",
        "package controllers\n",
        "package controllers\n\nimport \"testing\"\n",
    )
}
