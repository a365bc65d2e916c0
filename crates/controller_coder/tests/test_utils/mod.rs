//! Test doubles for the service: a scripted gateway and a simulated git.

#![allow(dead_code)]

use async_trait::async_trait;
use coder_core::{ModelExchange, Stage};
use coder_error::{CoderResult, GatewayError, GatewayErrorKind};
use coder_interface::{CommandOutput, CommandRunner, ModelGateway};
use coder_pipeline::Prompts;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const WORKSPACE_SCHEMA: &str = "CREATE TABLE api.workspaces (\n    id SERIAL PRIMARY KEY,\n    status api.workspace_status\n);";

pub const WORKSPACE_STATE_MACHINE: &str =
    "stateDiagram-v2\n    [*] --> PENDING\n    PENDING --> CREATED\n    CREATED --> RUNNING\n    RUNNING --> DELETED";

/// Answers every stage for the `workspace` resource.
#[derive(Debug, Default)]
pub struct WorkspaceGateway {
    prompts: Prompts,
    calls: AtomicUsize,
    user_texts: Mutex<Vec<String>>,
}

impl WorkspaceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn user_texts(&self) -> Vec<String> {
        self.user_texts.lock().unwrap().clone()
    }

    fn stage_of(&self, exchange: &ModelExchange) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.prompts.for_stage(*stage) == exchange.system_prompt())
    }
}

#[async_trait]
impl ModelGateway for WorkspaceGateway {
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_texts.lock().unwrap().push(exchange.user_text());
        let text = match self.stage_of(exchange) {
            Some(Stage::ResourceType) => {
                "```yaml\nresource_name: workspace\ngo_type: |\n  package v1\n\n  type Workspace struct{}\n```"
            }
            Some(Stage::StorageInterface) => {
                "```yaml\nstorage_interface_full: |\n  package storage\n\n  type Storage interface {\n  \tListWorkspace() error\n  }\n```"
            }
            Some(Stage::StorageImpl) => {
                "```yaml\nstorage_impl_full: |\n  package storage\n\n  func (s *postgrestStorage) ListWorkspace() error { return nil }\n```"
            }
            Some(Stage::Controller) => {
                "```yaml\ncontroller_impl: |\n  package controllers\n\n  type WorkspaceController struct{}\ncontroller_test: |\n  package controllers\n\n  import \"testing\"\n```"
            }
            None => {
                return Err(GatewayError::new(GatewayErrorKind::SamplingFailed(
                    "unknown prompt".to_string(),
                ))
                .into());
            }
        };
        Ok(text.to_string())
    }

    fn backend_name(&self) -> &'static str {
        "workspace-mock"
    }
}

/// Simulated git: tracks local and remote branches and commits.
#[derive(Debug, Default)]
pub struct FakeGit {
    local: Mutex<HashSet<String>>,
    remote: Mutex<HashMap<String, Vec<String>>>,
    current: Mutex<Option<String>>,
    pending: Mutex<Vec<String>>,
    log: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remote_commits(&self, branch: &str) -> Vec<String> {
        self.remote
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_default()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeGit {
    async fn run(&self, program: &str, args: &[String], _cwd: &Path) -> CoderResult<CommandOutput> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.log.lock().unwrap().push(line);

        if program != "git" {
            return Ok(CommandOutput::ok(""));
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = match args.as_slice() {
            ["ls-remote", "--heads", _, branch] => {
                if self.remote.lock().unwrap().contains_key(*branch) {
                    CommandOutput::ok(format!("abc\trefs/heads/{}", branch))
                } else {
                    CommandOutput::ok("")
                }
            }
            ["branch", "--list", branch] => {
                if self.local.lock().unwrap().contains(*branch) {
                    CommandOutput::ok(format!("  {}", branch))
                } else {
                    CommandOutput::ok("")
                }
            }
            ["checkout", "-b", branch, ..] => {
                self.local.lock().unwrap().insert(branch.to_string());
                *self.current.lock().unwrap() = Some(branch.to_string());
                CommandOutput::ok("")
            }
            ["commit", "-m", message] => {
                self.pending.lock().unwrap().push(message.to_string());
                CommandOutput::ok("")
            }
            ["push", "-u", _, branch] => {
                let commits = std::mem::take(&mut *self.pending.lock().unwrap());
                self.remote
                    .lock()
                    .unwrap()
                    .insert(branch.to_string(), commits);
                CommandOutput::ok("")
            }
            _ => CommandOutput::ok(""),
        };
        Ok(output)
    }
}

/// A checkout with the two storage files the service reads.
pub fn checkout() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("pkg/storage")).expect("mkdir");
    std::fs::write(
        dir.path().join("pkg/storage/storage.go"),
        "package storage\n\ntype Storage interface {}\n",
    )
    .expect("write storage.go");
    std::fs::write(
        dir.path().join("pkg/storage/postgrest.go"),
        "package storage\n\ntype postgrestStorage struct{}\n",
    )
    .expect("write postgrest.go");
    dir
}
