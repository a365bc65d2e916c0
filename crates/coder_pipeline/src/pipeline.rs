//! Orchestrates the four stages of one generation run.

use crate::{PipelineAccumulator, Prompts, StageRunner};
use coder_core::{ArtifactSet, GenerationRequest};
use coder_error::CoderResult;
use coder_interface::ModelGateway;
use tracing::{info, instrument};

/// Runs resource type, then storage interface and storage implementation
/// together, then the controller.
///
/// The pipeline does no file I/O. A failure in any stage aborts the run and
/// nothing is returned for the stages that succeeded.
#[derive(Debug, Clone)]
pub struct Pipeline<G> {
    stages: StageRunner<G>,
}

impl<G: ModelGateway> Pipeline<G> {
    /// Pipeline over `gateway` with the default prompts.
    pub fn new(gateway: G) -> Self {
        Self::from_runner(StageRunner::new(gateway, Prompts::default()))
    }

    /// Pipeline over a configured stage runner.
    pub fn from_runner(stages: StageRunner<G>) -> Self {
        Self { stages }
    }

    /// The stage runner, for callers that need a single stage.
    pub fn stages(&self) -> &StageRunner<G> {
        &self.stages
    }

    /// Generate the full artifact set for `request`.
    #[instrument(skip_all, fields(backend = self.stages.gateway().backend_name()))]
    pub async fn run(&self, request: &GenerationRequest) -> CoderResult<ArtifactSet> {
        let mut acc = PipelineAccumulator::new();

        let resource_type = self
            .stages
            .resource_type(request.sql_schema(), request.state_machine())
            .await?;
        acc.record_resource_type(resource_type);
        let resource_name = acc.resource_name()?.to_string();

        let (storage_interface, storage_impl) = tokio::try_join!(
            self.stages
                .storage_interface(&resource_name, request.current_storage_interface_text()),
            self.stages
                .storage_impl(&resource_name, request.current_storage_impl_text()),
        )?;
        acc.record_storage_interface(storage_interface);
        acc.record_storage_impl(storage_impl);

        let inputs = acc.controller_inputs(request.state_machine())?;
        let controller = self.stages.controller(&inputs).await?;

        let artifacts = acc.into_artifacts(controller)?;
        info!(
            resource_name = %resource_name,
            files = artifacts.len(),
            "Pipeline complete"
        );
        Ok(artifacts)
    }
}
