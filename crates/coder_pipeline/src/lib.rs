//! Staged code generation for the controller coder.
//!
//! A run turns a SQL schema and a state machine description into five Go
//! source files through four model calls:
//!
//! 1. resource type (`resource_name`, `go_type`)
//! 2. storage interface (`storage_interface_full`)
//! 3. storage implementation (`storage_impl_full`), on the strong model
//! 4. controller (`controller_impl`, `controller_test`)
//!
//! Stages 2 and 3 only need the resource name and run concurrently.
//! Each model response is reduced to a YAML payload by [`extract_yaml`] and
//! checked against the stage's required fields before anything else sees it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accumulator;
mod extraction;
mod pipeline;
mod prompts;
mod stages;

pub use accumulator::PipelineAccumulator;
pub use extraction::{extract_yaml, yaml_payload};
pub use pipeline::Pipeline;
pub use prompts::Prompts;
pub use stages::{
    Controller, ControllerInputs, ResourceType, StageRunner, StorageImpl, StorageInterface,
    is_usable_resource_name, validate_payload,
};
