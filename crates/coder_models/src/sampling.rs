//! Backend A: delegate completions to the host.

use async_trait::async_trait;
use coder_core::ModelExchange;
use coder_error::{CoderResult, GatewayError, GatewayErrorKind};
use coder_interface::{ModelGateway, SamplingChannel};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Forwards each exchange to a host sampling channel.
///
/// The exchange's model preferences travel with it; the host applies its own
/// selection policy. Nothing is retried here.
#[derive(Clone)]
pub struct SamplingBackend {
    channel: Arc<dyn SamplingChannel>,
}

impl std::fmt::Debug for SamplingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplingBackend").finish_non_exhaustive()
    }
}

impl SamplingBackend {
    /// Wrap a host channel.
    pub fn new(channel: Arc<dyn SamplingChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ModelGateway for SamplingBackend {
    #[instrument(
        name = "sampling_send",
        skip(self, exchange),
        fields(max_tokens = *exchange.max_tokens())
    )]
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        debug!(
            preferences = ?exchange.model_preferences(),
            "Requesting completion from host"
        );
        match self.channel.create_message(exchange).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "Host sampling failed");
                Err(GatewayError::new(GatewayErrorKind::SamplingFailed(e.to_string())).into())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "sampling"
    }
}
