//! Language-model gateway for the controller coder.
//!
//! Two backends answer [`ModelGateway::send`](coder_interface::ModelGateway::send):
//!
//! - [`SamplingBackend`] hands the exchange to a host-provided
//!   [`SamplingChannel`](coder_interface::SamplingChannel) and lets the host
//!   pick the model.
//! - [`DirectBackend`] picks a model itself and calls a
//!   [`ModelProvider`](coder_interface::ModelProvider), retrying transient
//!   failures with exponential backoff.
//!
//! [`Gateway`] wraps whichever backend was chosen at construction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod direct;
mod gateway;
mod sampling;

#[cfg(feature = "gemini")]
mod gemini;

pub use direct::{
    DEFAULT_FAST_MODEL, DEFAULT_STRONG_MODEL, DirectBackend, DirectConfig, DirectConfigBuilder,
};
pub use gateway::{Gateway, GatewayBackend};
pub use sampling::SamplingBackend;

#[cfg(feature = "gemini")]
pub use gemini::{GEMINI_API_KEY_VAR, GeminiProvider};
