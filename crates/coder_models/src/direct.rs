//! Backend B: call a model provider directly with model selection and retry.

use async_trait::async_trait;
use coder_core::{ModelExchange, ModelTier, SelectionPolicy};
use coder_error::{CoderResult, GatewayError, GatewayErrorKind, RetryableError};
use coder_interface::{ModelGateway, ModelProvider};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};

/// Model used when no strong model is requested.
pub const DEFAULT_FAST_MODEL: &str = "gemini-2.0-flash";

/// Model used for stages that ask for maximum capability.
pub const DEFAULT_STRONG_MODEL: &str = "gemini-2.5-pro-exp-03-25";

/// Model roster and retry budget for the direct backend.
///
/// # Examples
///
/// ```
/// use coder_models::DirectConfig;
///
/// let config = DirectConfig::builder().max_retries(2usize).build().unwrap();
/// assert_eq!(config.fast_model(), "gemini-2.0-flash");
/// assert_eq!(*config.max_retries(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct DirectConfig {
    /// Cheaper model identifier
    #[builder(default = "DEFAULT_FAST_MODEL.to_string()")]
    fast_model: String,
    /// Stronger model identifier
    #[builder(default = "DEFAULT_STRONG_MODEL.to_string()")]
    strong_model: String,
    /// Retries after the first attempt
    #[builder(default = "5")]
    max_retries: usize,
    /// Base of the exponential backoff, in milliseconds
    #[builder(default = "500")]
    initial_backoff_ms: u64,
    /// Upper bound on a single backoff delay, in seconds
    #[builder(default = "30")]
    max_delay_secs: u64,
}

impl DirectConfig {
    /// Creates a new config builder.
    pub fn builder() -> DirectConfigBuilder {
        DirectConfigBuilder::default()
    }

    /// Model identifier for a tier.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Strong => &self.strong_model,
        }
    }
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            strong_model: DEFAULT_STRONG_MODEL.to_string(),
            max_retries: 5,
            initial_backoff_ms: 500,
            max_delay_secs: 30,
        }
    }
}

/// Calls a [`ModelProvider`] directly.
///
/// The model is chosen per exchange by a [`SelectionPolicy`]; the default
/// policy only picks the strong model when `intelligence_priority` is exactly
/// `1.0`. Retryable provider errors are retried with exponential backoff and
/// jitter; permanent errors fail on the spot. Either way the caller sees
/// [`GatewayErrorKind::GenerationUnavailable`].
#[derive(Clone)]
pub struct DirectBackend<P> {
    provider: P,
    config: DirectConfig,
    policy: SelectionPolicy,
}

impl<P: ModelProvider> std::fmt::Debug for DirectBackend<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectBackend")
            .field("provider", &self.provider.provider_name())
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<P: ModelProvider> DirectBackend<P> {
    /// Create a backend with the default selection policy.
    pub fn new(provider: P, config: DirectConfig) -> Self {
        Self {
            provider,
            config,
            policy: SelectionPolicy::default(),
        }
    }

    /// Replace the selection policy.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Backend configuration.
    pub fn config(&self) -> &DirectConfig {
        &self.config
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Model that would serve `exchange`.
    pub fn select_model(&self, exchange: &ModelExchange) -> &str {
        let tier = self.policy.select(exchange.model_preferences().as_ref());
        self.config.model_for(tier)
    }
}

#[async_trait]
impl<P: ModelProvider> ModelGateway for DirectBackend<P> {
    #[instrument(
        name = "direct_send",
        skip(self, exchange),
        fields(provider = self.provider.provider_name(), model = tracing::field::Empty)
    )]
    async fn send(&self, exchange: &ModelExchange) -> CoderResult<String> {
        let model = self.select_model(exchange);
        tracing::Span::current().record("model", model);
        debug!(max_tokens = *exchange.max_tokens(), "Sending exchange");

        let strategy = ExponentialBackoff::from_millis(self.config.initial_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(self.config.max_delay_secs))
            .map(jitter)
            .take(self.config.max_retries);

        let attempts = AtomicUsize::new(0);
        let counter = &attempts;
        let provider = &self.provider;

        let result = Retry::spawn(strategy, move || async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            match provider.generate(model, exchange).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, attempt, "Provider call failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Permanent provider error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await;

        let attempts = attempts.load(Ordering::SeqCst);
        match result {
            Ok(text) => {
                info!(attempts, chars = text.len(), "Generation complete");
                Ok(text)
            }
            Err(e) => Err(GatewayError::new(GatewayErrorKind::GenerationUnavailable {
                model: model.to_string(),
                attempts,
                message: e.to_string(),
            })
            .into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "direct"
    }
}
