//! Test utilities for gateway tests.
//!
//! Mock providers and sampling channels with scripted behavior and call
//! recording.

use async_trait::async_trait;
use coder_core::{Message, ModelExchange, ModelPreferences};
use coder_error::{CoderResult, ConfigError, ProviderError, ProviderErrorKind};
use coder_interface::{ModelProvider, SamplingChannel};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the mock provider does on each call.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with this text
    Success(String),
    /// Always fail with this error
    Error(ProviderErrorKind),
    /// Fail `failures` times, then succeed
    FailThenSucceed {
        failures: usize,
        error: ProviderErrorKind,
        text: String,
    },
}

/// Provider double that counts calls and records requested models.
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    models: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new_success(text: &str) -> Self {
        Self::with_behavior(MockBehavior::Success(text.to_string()))
    }

    pub fn new_error(error: ProviderErrorKind) -> Self {
        Self::with_behavior(MockBehavior::Error(error))
    }

    pub fn new_fail_then_succeed(failures: usize, error: ProviderErrorKind, text: &str) -> Self {
        Self::with_behavior(MockBehavior::FailThenSucceed {
            failures,
            error,
            text: text.to_string(),
        })
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn generate(
        &self,
        model: &str,
        _exchange: &ModelExchange,
    ) -> Result<String, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(ProviderError::new(kind.clone())),
            MockBehavior::FailThenSucceed {
                failures,
                error,
                text,
            } => {
                if call < *failures {
                    Err(ProviderError::new(error.clone()))
                } else {
                    Ok(text.clone())
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Sampling channel double that records the preferences it was given.
#[derive(Debug, Default)]
pub struct MockSamplingChannel {
    reply: Option<String>,
    seen: Mutex<Vec<Option<ModelPreferences>>>,
}

#[allow(dead_code)]
impl MockSamplingChannel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing() -> Self {
        Self::default()
    }

    pub fn seen_preferences(&self) -> Vec<Option<ModelPreferences>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SamplingChannel for MockSamplingChannel {
    async fn create_message(&self, exchange: &ModelExchange) -> CoderResult<String> {
        self.seen
            .lock()
            .unwrap()
            .push(*exchange.model_preferences());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ConfigError::new("host declined the sampling request").into()),
        }
    }
}

/// Exchange with a single user turn and optional preferences.
pub fn create_test_exchange(prompt: &str, preferences: Option<ModelPreferences>) -> ModelExchange {
    let mut builder = ModelExchange::builder();
    builder
        .system_prompt("Return YAML only.")
        .messages(vec![Message::user(prompt)]);
    if let Some(prefs) = preferences {
        builder.model_preferences(prefs);
    }
    builder.build().expect("Failed to build test exchange")
}
