//! The controller coder service.

use crate::{BackendKind, CoderConfig, GenerationOutcome};
use coder_core::{Artifact, ArtifactPaths, ArtifactSet, GenerationRequest};
use coder_error::{BuilderError, BuilderErrorKind, CoderResult, ConfigError, IoError};
use coder_git::{BranchCommitter, TokioCommandRunner};
use coder_interface::{CommandRunner, ModelGateway};
use coder_models::Gateway;
use coder_pipeline::{Pipeline, StageRunner, is_usable_resource_name};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Generates resource code and optionally lands it on a fresh branch.
///
/// Commits are serialized: concurrent `generate_controller(.., true)` calls
/// never share the checkout.
#[derive(Debug)]
pub struct ControllerCoder<G, R> {
    pipeline: Pipeline<G>,
    committer: Option<BranchCommitter<R>>,
    commit_lock: Mutex<()>,
}

impl ControllerCoder<Gateway, TokioCommandRunner> {
    /// Build the service described by `config`, with real subprocesses.
    ///
    /// Only the direct backend can be built here: the sampling backend needs
    /// a host channel, which callers supply through
    /// [`ControllerCoder::new`] with a [`Gateway`] around a
    /// [`SamplingBackend`](coder_models::SamplingBackend).
    #[instrument(skip(config), fields(backend = %config.backend()))]
    pub fn from_config(config: &CoderConfig) -> CoderResult<Self> {
        let gateway = match config.backend() {
            BackendKind::Direct => direct_gateway(config)?,
            BackendKind::Sampling => {
                return Err(ConfigError::new(
                    "the sampling backend needs a host sampling channel and cannot be built from configuration alone",
                )
                .into());
            }
        };
        Self::new(gateway, TokioCommandRunner, config)
    }
}

#[cfg(feature = "gemini")]
fn direct_gateway(config: &CoderConfig) -> CoderResult<Gateway> {
    use coder_models::{GatewayBackend, GeminiProvider};
    use std::sync::Arc;

    let provider = GeminiProvider::from_env()?;
    Ok(Gateway::new(GatewayBackend::direct(
        Arc::new(provider),
        config.direct_config()?,
    )))
}

#[cfg(not(feature = "gemini"))]
fn direct_gateway(_config: &CoderConfig) -> CoderResult<Gateway> {
    Err(ConfigError::new("the direct backend requires the `gemini` feature").into())
}

impl<G: ModelGateway, R: CommandRunner> ControllerCoder<G, R> {
    /// Build the service from its parts.
    ///
    /// Without a configured `code_base` the service can still generate, but
    /// every operation that reads or writes the checkout fails.
    pub fn new(gateway: G, runner: R, config: &CoderConfig) -> CoderResult<Self> {
        let stages = StageRunner::new(gateway, config.prompts().clone())
            .with_max_tokens(*config.generation().max_tokens());
        let committer = config
            .code_base()
            .as_ref()
            .map(|root| BranchCommitter::new(runner, root.clone(), config.git().clone()));

        Ok(Self {
            pipeline: Pipeline::from_runner(stages),
            committer,
            commit_lock: Mutex::new(()),
        })
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline<G> {
        &self.pipeline
    }

    fn committer(&self) -> CoderResult<&BranchCommitter<R>> {
        self.committer.as_ref().ok_or_else(|| {
            ConfigError::new("code_base is not configured; set it in controller_coder.toml or CONTROLLER_CODER__CODE_BASE").into()
        })
    }

    /// Root of the checkout.
    pub fn code_base(&self) -> CoderResult<&Path> {
        Ok(self.committer()?.code_base())
    }

    async fn read_source(&self, relative: &str) -> CoderResult<String> {
        let path = self.code_base()?.join(relative);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| IoError::new(path.display().to_string(), e.to_string()).into())
    }

    /// Generate `api/v1/{resource}_types.go` from a schema and state machine.
    #[instrument(skip_all)]
    pub async fn generate_resource_type_file(
        &self,
        sql_schema: &str,
        state_machine: &str,
    ) -> CoderResult<Artifact> {
        let result = self
            .pipeline
            .stages()
            .resource_type(sql_schema, state_machine)
            .await?;
        let paths = ArtifactPaths::for_resource(result.resource_name());
        Ok(Artifact::new(paths.resource_type().clone(), result.go_type().clone()))
    }

    /// Regenerate `pkg/storage/storage.go` with the resource's methods.
    #[instrument(skip(self))]
    pub async fn generate_storage_interface_file(
        &self,
        resource_name: &str,
    ) -> CoderResult<Artifact> {
        check_resource_name(resource_name)?;
        let current = self.read_source(ArtifactPaths::STORAGE_INTERFACE).await?;
        let result = self
            .pipeline
            .stages()
            .storage_interface(resource_name, &current)
            .await?;
        Ok(Artifact::new(
            ArtifactPaths::STORAGE_INTERFACE,
            result.storage_interface_full().clone(),
        ))
    }

    /// Regenerate `pkg/storage/postgrest.go` with the resource's methods.
    #[instrument(skip(self))]
    pub async fn generate_storage_impl_file(&self, resource_name: &str) -> CoderResult<Artifact> {
        check_resource_name(resource_name)?;
        let current = self.read_source(ArtifactPaths::STORAGE_IMPL).await?;
        let result = self
            .pipeline
            .stages()
            .storage_impl(resource_name, &current)
            .await?;
        Ok(Artifact::new(
            ArtifactPaths::STORAGE_IMPL,
            result.storage_impl_full().clone(),
        ))
    }

    /// Run the whole pipeline, and commit the result when `create_branch`.
    ///
    /// The current storage files are read from the code base first.
    #[instrument(skip(self, sql_schema, state_machine))]
    pub async fn generate_controller(
        &self,
        sql_schema: &str,
        state_machine: &str,
        create_branch: bool,
    ) -> CoderResult<GenerationOutcome> {
        let current_storage_interface = self.read_source(ArtifactPaths::STORAGE_INTERFACE).await?;
        let current_storage_impl = self.read_source(ArtifactPaths::STORAGE_IMPL).await?;

        let request = GenerationRequest::builder()
            .sql_schema(sql_schema)
            .state_machine(state_machine)
            .current_storage_interface(current_storage_interface)
            .current_storage_impl(current_storage_impl)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let artifacts = self.pipeline.run(&request).await?;

        if !create_branch {
            return Ok(GenerationOutcome::Artifacts { artifacts });
        }

        let branch_name = self.commit(&artifacts).await?;
        Ok(GenerationOutcome::Committed {
            branch_name,
            artifacts,
        })
    }

    /// Commit an artifact set to a fresh branch.
    pub async fn commit(&self, artifacts: &ArtifactSet) -> CoderResult<String> {
        check_resource_name(artifacts.resource_name())?;
        let committer = self.committer()?;
        let _guard = self.commit_lock.lock().await;
        let branch = committer
            .commit(artifacts.resource_name(), artifacts)
            .await?;
        info!(branch = %branch, "Controller committed");
        Ok(branch)
    }

    /// Write artifacts into the code base without touching git.
    pub async fn write_artifacts(&self, artifacts: &ArtifactSet) -> CoderResult<()> {
        let committer = self.committer()?;
        let _guard = self.commit_lock.lock().await;
        committer.materialize(artifacts).await
    }

    /// Write one artifact into the code base.
    pub async fn write_artifact(&self, artifact: &Artifact) -> CoderResult<()> {
        let committer = self.committer()?;
        let _guard = self.commit_lock.lock().await;
        committer.write_artifact(artifact).await
    }
}

fn check_resource_name(resource_name: &str) -> CoderResult<()> {
    if is_usable_resource_name(resource_name) {
        Ok(())
    } else {
        Err(
            BuilderError::new(BuilderErrorKind::InvalidResourceName(resource_name.to_string()))
                .into(),
        )
    }
}
