//! The gateway value handed to the pipeline.

use crate::{DirectBackend, SamplingBackend};
use async_trait::async_trait;
use coder_core::ModelExchange;
use coder_error::CoderResult;
use coder_interface::{ModelGateway, ModelProvider, SamplingChannel};
use std::sync::Arc;

/// Which backend serves completions.
///
/// Chosen once when the process starts and fixed for the gateway's
/// lifetime.
#[derive(Debug, Clone, derive_more::From)]
pub enum GatewayBackend {
    /// Host sampling channel
    Sampling(SamplingBackend),
    /// Direct provider calls
    Direct(DirectBackend<Arc<dyn ModelProvider>>),
}

impl GatewayBackend {
    /// Sampling backend over a host channel.
    pub fn sampling(channel: Arc<dyn SamplingChannel>) -> Self {
        Self::Sampling(SamplingBackend::new(channel))
    }

    /// Direct backend over a provider.
    pub fn direct(provider: Arc<dyn ModelProvider>, config: crate::DirectConfig) -> Self {
        Self::Direct(DirectBackend::new(provider, config))
    }
}

/// Language-model gateway with its backend fixed at construction.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use coder_core::{Message, ModelExchange};
/// use coder_error::CoderResult;
/// use coder_interface::{ModelGateway, SamplingChannel};
/// use coder_models::{Gateway, GatewayBackend};
/// use std::sync::Arc;
///
/// struct Echo;
///
/// #[async_trait]
/// impl SamplingChannel for Echo {
///     async fn create_message(&self, exchange: &ModelExchange) -> CoderResult<String> {
///         Ok(exchange.user_text())
///     }
/// }
///
/// let gateway = Gateway::new(GatewayBackend::sampling(Arc::new(Echo)));
/// let exchange = ModelExchange::builder()
///     .system_prompt("")
///     .messages(vec![Message::user("hello")])
///     .build()
///     .unwrap();
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let text = rt.block_on(gateway.send(&exchange)).unwrap();
/// assert_eq!(text, "hello");
/// assert_eq!(gateway.backend_name(), "sampling");
/// ```
#[derive(Debug, Clone)]
pub struct Gateway {
    backend: GatewayBackend,
}

impl Gateway {
    /// Build a gateway around `backend`.
    pub fn new(backend: impl Into<GatewayBackend>) -> Self {
        Self {
            backend: backend.into(),
        }
    }

    /// The configured backend.
    pub fn backend(&self) -> &GatewayBackend {
        &self.backend
    }
}

#[async_trait]
impl ModelGateway for Gateway {
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        match &self.backend {
            GatewayBackend::Sampling(backend) => backend.send(exchange).await,
            GatewayBackend::Direct(backend) => backend.send(exchange).await,
        }
    }

    fn backend_name(&self) -> &'static str {
        match &self.backend {
            GatewayBackend::Sampling(backend) => backend.backend_name(),
            GatewayBackend::Direct(backend) => backend.backend_name(),
        }
    }
}
