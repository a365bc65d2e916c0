//! Gemini provider for the direct backend.

use async_trait::async_trait;
use coder_core::{ModelExchange, Role};
use coder_error::{ProviderError, ProviderErrorKind};
use coder_interface::ModelProvider;
use gemini_rust::{Gemini, client::Model};
use tracing::{debug, instrument};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Calls Google's Gemini API through `gemini-rust`.
///
/// A client is created per call for the requested model, so one provider
/// serves both the fast and the strong model.
#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider").finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Create a provider with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coder_models::GeminiProvider;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let provider = GeminiProvider::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_provider_from_env")]
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR).map_err(|_| {
            ProviderError::new(ProviderErrorKind::MissingApiKey(
                GEMINI_API_KEY_VAR.to_string(),
            ))
        })?;
        Ok(Self::new(api_key))
    }

    /// Map a model name to the `gemini-rust` model type.
    ///
    /// Unknown names become `Model::Custom` with the `models/` prefix the
    /// API requires.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Turn a `gemini-rust` error into a classified provider error.
    fn parse_gemini_error(err: impl std::fmt::Display) -> ProviderError {
        let message = err.to_string();
        match extract_status_code(&message) {
            Some(status_code) => ProviderError::new(ProviderErrorKind::HttpError {
                status_code,
                message,
            }),
            None => ProviderError::new(ProviderErrorKind::ApiRequest(message)),
        }
    }
}

/// Pull the status code out of messages like
/// "bad response from server; code 503; description: ...".
fn extract_status_code(message: &str) -> Option<u16> {
    let start = message.find("code ")? + 5;
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// The API takes an `i32`; larger budgets are clamped.
fn output_token_limit(max_tokens: u32) -> i32 {
    i32::try_from(max_tokens).unwrap_or(i32::MAX)
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    #[instrument(name = "gemini_generate", skip(self, exchange))]
    async fn generate(
        &self,
        model: &str,
        exchange: &ModelExchange,
    ) -> Result<String, ProviderError> {
        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model))
            .map_err(|e| ProviderError::new(ProviderErrorKind::ClientCreation(e.to_string())))?;

        let mut builder = client
            .generate_content()
            .with_system_prompt(exchange.system_prompt());

        for message in exchange.messages() {
            builder = match message.role() {
                Role::User => builder.with_user_message(message.text()),
                Role::Assistant => builder.with_model_message(message.text()),
            };
        }

        builder = builder.with_max_output_tokens(output_token_limit(*exchange.max_tokens()));

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;
        let text = response.text();
        debug!(chars = text.len(), "Gemini response received");

        if text.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
        }
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
