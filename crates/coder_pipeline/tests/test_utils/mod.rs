//! Test utilities for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use coder_core::{ModelExchange, Stage};
use coder_error::{CoderResult, GatewayError, GatewayErrorKind};
use coder_interface::ModelGateway;
use coder_pipeline::Prompts;
use std::collections::HashMap;
use std::sync::Mutex;

pub const WORKSPACE_SCHEMA: &str = r#"CREATE TYPE api.workspace_status AS (
    phase TEXT,
    error_message TEXT
);

CREATE TABLE api.workspaces (
    id SERIAL PRIMARY KEY,
    api_version TEXT NOT NULL,
    kind TEXT NOT NULL,
    metadata api.metadata,
    status api.workspace_status
);"#;

pub const WORKSPACE_STATE_MACHINE: &str = r#"stateDiagram-v2
    [*] --> PENDING
    PENDING --> CREATED
    CREATED --> RUNNING
    RUNNING --> DELETED
    DELETED --> [*]"#;

/// Gateway double that answers per stage and records every exchange.
///
/// The stage is recognized from the system prompt, so the default prompts
/// must be in use.
#[derive(Debug)]
pub struct MockGateway {
    responses: HashMap<Stage, String>,
    prompts: Prompts,
    calls: Mutex<Vec<(Stage, ModelExchange)>>,
}


impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            prompts: Prompts::default(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, stage: Stage, text: &str) -> Self {
        self.responses.insert(stage, text.to_string());
        self
    }

    /// Well-formed answers for the `workspace` resource.
    pub fn workspace() -> Self {
        Self::new()
            .respond(
                Stage::ResourceType,
                "```yaml\nresource_name: workspace\ngo_type: |\n  package v1\n\n  type Workspace struct {\n  \tID int `json:\"id\"`\n  }\n```",
            )
            .respond(
                Stage::StorageInterface,
                "```yaml\nstorage_interface_full: |\n  package storage\n\n  type Storage interface {\n  \tListWorkspace(option ListOption) ([]v1.Workspace, error)\n  }\n```",
            )
            .respond(
                Stage::StorageImpl,
                "```yaml\nstorage_impl_full: |\n  package storage\n\n  func (s *postgrestStorage) ListWorkspace(option ListOption) ([]v1.Workspace, error) {\n  \treturn nil, nil\n  }\n```",
            )
            .respond(
                Stage::Controller,
                "```yaml\ncontroller_impl: |\n  package controllers\n\n  type WorkspaceController struct{}\ncontroller_test: |\n  package controllers\n\n  func TestWorkspaceController(t *testing.T) {}\n```",
            )
    }

    pub fn calls(&self) -> Vec<(Stage, ModelExchange)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stages_called(&self) -> Vec<Stage> {
        self.calls().into_iter().map(|(stage, _)| stage).collect()
    }

    pub fn exchange_for(&self, stage: Stage) -> Option<ModelExchange> {
        self.calls()
            .into_iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, exchange)| exchange)
    }

    fn stage_of(&self, exchange: &ModelExchange) -> Stage {
        Stage::ALL
            .into_iter()
            .find(|stage| self.prompts.for_stage(*stage) == exchange.system_prompt())
            .expect("exchange uses a default stage prompt")
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        let stage = self.stage_of(exchange);
        self.calls.lock().unwrap().push((stage, exchange.clone()));
        self.responses.get(&stage).cloned().ok_or_else(|| {
            GatewayError::new(GatewayErrorKind::SamplingFailed(format!(
                "no scripted response for {}",
                stage
            )))
            .into()
        })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
