//! Controller coder: generate a resource's Go types, storage layer and
//! controller with a language model, then land them on a fresh git branch.
//!
//! [`ControllerCoder`] is the entry point. It exposes the four generation
//! operations on top of the staged [`Pipeline`](coder_pipeline::Pipeline)
//! and the [`BranchCommitter`](coder_git::BranchCommitter).
//!
//! # Example
//!
//! ```no_run
//! use controller_coder::{CoderConfig, ControllerCoder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CoderConfig::load()?;
//! let coder = ControllerCoder::from_config(&config)?;
//!
//! let outcome = coder
//!     .generate_controller(
//!         "CREATE TABLE api.workspaces (id SERIAL PRIMARY KEY);",
//!         "stateDiagram-v2\n    [*] --> PENDING",
//!         true,
//!     )
//!     .await?;
//! println!("branch: {:?}", outcome.branch_name());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod coder;
mod config;
mod logging;
mod outcome;

pub use coder::ControllerCoder;
pub use config::{BackendKind, CoderConfig, ENV_PREFIX, GenerationConfig, ModelsConfig};
pub use logging::{LogFormat, init_logging};
pub use outcome::GenerationOutcome;

// Re-export the pieces callers need to assemble a custom service.
pub use coder_core::{Artifact, ArtifactPaths, ArtifactSet, GenerationRequest};
pub use coder_error::{CoderError, CoderErrorKind, CoderResult};
pub use coder_git::{BranchCommitter, CommitSettings, TokioCommandRunner};
pub use coder_interface::{CommandRunner, ModelGateway, SamplingChannel};
pub use coder_models::{Gateway, GatewayBackend, SamplingBackend};
pub use coder_pipeline::{Pipeline, Prompts};
