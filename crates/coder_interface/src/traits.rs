//! Seams between the pipeline and the outside world.

use crate::CommandOutput;
use async_trait::async_trait;
use coder_core::ModelExchange;
use coder_error::{CoderResult, ProviderError};
use std::path::Path;
use std::sync::Arc;

/// Sends one exchange to a language model and returns its raw text.
///
/// This is the only capability the pipeline stages depend on.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Produce the model's text response for `exchange`.
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String>;

    /// Backend name for logging (e.g., "sampling", "direct").
    fn backend_name(&self) -> &'static str;
}

/// A concrete model API that can answer an exchange with a named model.
///
/// Errors are returned unwrapped so the caller can classify them with
/// [`RetryableError`](coder_error::RetryableError).
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Call `model` with `exchange`.
    async fn generate(&self, model: &str, exchange: &ModelExchange)
    -> Result<String, ProviderError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// A host-side channel that runs a completion on the caller's behalf.
///
/// The host decides which model to use; the exchange's preferences are
/// forwarded as hints.
#[async_trait]
pub trait SamplingChannel: Send + Sync {
    /// Ask the host to complete `exchange`.
    async fn create_message(&self, exchange: &ModelExchange) -> CoderResult<String>;
}

/// Runs an external program to completion and captures its output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`.
    ///
    /// A non-zero exit is not an error at this level; it is reported through
    /// [`CommandOutput::exit_code`]. Errors mean the process could not run.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> CoderResult<CommandOutput>;
}

#[async_trait]
impl<T: ModelGateway + ?Sized> ModelGateway for Arc<T> {
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        (**self).send(exchange).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

#[async_trait]
impl<T: ModelProvider + ?Sized> ModelProvider for Arc<T> {
    async fn generate(
        &self,
        model: &str,
        exchange: &ModelExchange,
    ) -> Result<String, ProviderError> {
        (**self).generate(model, exchange).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> CoderResult<CommandOutput> {
        (**self).run(program, args, cwd).await
    }
}
