//! State carried between stages of one pipeline run.

use crate::{Controller, ControllerInputs, ResourceType, StorageImpl, StorageInterface};
use coder_core::ArtifactSet;
use coder_error::{CoderResult, PipelineError, PipelineErrorKind};

/// Outputs recorded so far in a single run.
///
/// Starts empty and gains one stage result at a time. Reading a field that
/// was never recorded is an error, never a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineAccumulator {
    resource_type: Option<ResourceType>,
    storage_interface: Option<StorageInterface>,
    storage_impl: Option<StorageImpl>,
}

#[track_caller]
fn incomplete(field: &str) -> coder_error::CoderError {
    PipelineError::new(PipelineErrorKind::IncompleteAccumulator(field.to_string())).into()
}

impl PipelineAccumulator {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the stage 1 result.
    pub fn record_resource_type(&mut self, result: ResourceType) {
        self.resource_type = Some(result);
    }

    /// Record the stage 2 result.
    pub fn record_storage_interface(&mut self, result: StorageInterface) {
        self.storage_interface = Some(result);
    }

    /// Record the stage 3 result.
    pub fn record_storage_impl(&mut self, result: StorageImpl) {
        self.storage_impl = Some(result);
    }

    /// Resource name from stage 1.
    pub fn resource_name(&self) -> CoderResult<&str> {
        self.resource_type
            .as_ref()
            .map(|r| r.resource_name().as_str())
            .ok_or_else(|| incomplete("resource_name"))
    }

    /// Inputs for the controller stage.
    pub fn controller_inputs(&self, state_machine: &str) -> CoderResult<ControllerInputs> {
        let resource_type = self
            .resource_type
            .as_ref()
            .ok_or_else(|| incomplete("resource_name"))?;
        let storage_interface = self
            .storage_interface
            .as_ref()
            .ok_or_else(|| incomplete("storage_interface_full"))?;
        let storage_impl = self
            .storage_impl
            .as_ref()
            .ok_or_else(|| incomplete("storage_impl_full"))?;

        Ok(ControllerInputs::new(
            resource_type.resource_name(),
            state_machine,
            resource_type.go_type(),
            storage_interface.storage_interface_full(),
            storage_impl.storage_impl_full(),
        ))
    }

    /// Merge with the controller output into the final artifact set.
    pub fn into_artifacts(self, controller: Controller) -> CoderResult<ArtifactSet> {
        let resource_type = self.resource_type.ok_or_else(|| incomplete("resource_name"))?;
        let storage_interface = self
            .storage_interface
            .ok_or_else(|| incomplete("storage_interface_full"))?;
        let storage_impl = self
            .storage_impl
            .ok_or_else(|| incomplete("storage_impl_full"))?;

        Ok(ArtifactSet::assemble(
            resource_type.resource_name(),
            resource_type.go_type(),
            storage_interface.storage_interface_full(),
            storage_impl.storage_impl_full(),
            controller.controller_impl(),
            controller.controller_test(),
        ))
    }
}
