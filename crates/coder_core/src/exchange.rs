//! A single request/response turn with the language model.

use crate::{Message, ModelPreferences};
use serde::{Deserialize, Serialize};

/// Default output token budget for one exchange.
pub const DEFAULT_MAX_TOKENS: u32 = 32_768;

/// Everything the gateway needs to produce one model response.
///
/// Exchanges are transient: they are built by a stage, sent once, and dropped.
///
/// # Examples
///
/// ```
/// use coder_core::{Message, ModelExchange, ModelPreferences};
///
/// let exchange = ModelExchange::builder()
///     .system_prompt("Return YAML only.")
///     .messages(vec![Message::user("<input_resource_name>role</input_resource_name>")])
///     .model_preferences(ModelPreferences::quality())
///     .build()
///     .unwrap();
///
/// assert_eq!(*exchange.max_tokens(), 32_768);
/// assert_eq!(exchange.messages().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct ModelExchange {
    /// Opaque instruction text owned by configuration
    system_prompt: String,
    /// Ordered conversation turns
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default = "DEFAULT_MAX_TOKENS")]
    max_tokens: u32,
    /// Optional hint used for model selection
    #[builder(default, setter(strip_option))]
    model_preferences: Option<ModelPreferences>,
}

impl ModelExchange {
    /// Creates a new exchange builder.
    pub fn builder() -> ModelExchangeBuilder {
        ModelExchangeBuilder::default()
    }

    /// Concatenated text of every user turn, in order.
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| *m.role() == crate::Role::User)
            .map(|m| m.text().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
