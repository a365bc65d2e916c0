//! Core data types for the controller coder.
//!
//! This crate holds the values that flow through the generation pipeline:
//! the request, the model exchanges sent to the gateway, and the artifact
//! set handed to the commit automation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod exchange;
mod message;
mod preferences;
mod request;
mod role;
mod stage;

pub use artifact::{Artifact, ArtifactPaths, ArtifactSet};
pub use exchange::{DEFAULT_MAX_TOKENS, ModelExchange, ModelExchangeBuilder};
pub use message::Message;
pub use preferences::{ModelPreferences, ModelTier, SelectionPolicy};
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use role::Role;
pub use stage::Stage;
