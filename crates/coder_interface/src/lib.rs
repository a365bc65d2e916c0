//! Trait definitions for the controller coder.
//!
//! Every external collaborator sits behind one of these traits so the
//! pipeline and the commit automation can be driven by test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod traits;

pub use command::CommandOutput;
pub use traits::{CommandRunner, ModelGateway, ModelProvider, SamplingChannel};
