//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`controller_coder.toml` shipped with the crate)
//! 2. `~/.config/controller_coder/controller_coder.toml`
//! 3. `./controller_coder.toml`
//! 4. `CONTROLLER_CODER__*` environment variables, `__` separating sections
//!    (`CONTROLLER_CODER__GIT__BRANCH_PREFIX`)

use coder_error::{BuilderError, CoderResult, ConfigError};
use coder_git::CommitSettings;
use coder_models::DirectConfig;
use coder_pipeline::Prompts;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../controller_coder.toml");

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CONTROLLER_CODER";

/// Which gateway backend serves completions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Call the model provider directly
    #[default]
    #[display("direct")]
    Direct,
    /// Delegate completions to a host sampling channel
    #[display("sampling")]
    Sampling,
}

/// Model identifiers for the direct backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelsConfig {
    /// Cheaper model
    fast: String,
    /// Stronger model
    strong: String,
}

/// Token budget and retry tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerationConfig {
    /// Output token budget per exchange
    max_tokens: u32,
    /// Retries after the first attempt
    max_retries: usize,
    /// Base of the exponential backoff
    initial_backoff_ms: u64,
    /// Cap on a single backoff delay
    max_delay_secs: u64,
}

/// Complete controller coder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CoderConfig {
    /// Root of the project checkout
    #[serde(default)]
    code_base: Option<PathBuf>,
    /// Gateway backend
    #[serde(default)]
    backend: BackendKind,
    /// Model identifiers
    models: ModelsConfig,
    /// Generation tuning
    generation: GenerationConfig,
    /// Commit automation
    #[serde(default)]
    git: CommitSettings,
    /// System prompt overrides
    #[serde(default)]
    prompts: Prompts,
}

impl CoderConfig {
    /// Load configuration from every layer.
    ///
    /// Missing user files are skipped. A `.env` file, when present, is loaded
    /// into the environment first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use controller_coder::CoderConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = CoderConfig::load()?;
    /// println!("backend: {}", config.backend());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> CoderResult<Self> {
        let _ = dotenvy::dotenv();
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/controller_coder/controller_coder.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("controller_coder").required(false))
            .add_source(Self::environment());

        Self::finish(builder)
    }

    /// Load the bundled defaults overlaid with one file, then the
    /// environment.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CoderResult<Self> {
        let builder = Self::defaults()
            .add_source(File::from(path.as_ref()))
            .add_source(Self::environment());
        Self::finish(builder)
    }

    /// Bundled defaults overlaid with TOML text. The environment is not read.
    ///
    /// # Examples
    ///
    /// ```
    /// use controller_coder::{BackendKind, CoderConfig};
    ///
    /// let config = CoderConfig::from_toml_str(r#"
    /// backend = "sampling"
    /// [git]
    /// branch_prefix = "gen-"
    /// "#).unwrap();
    ///
    /// assert_eq!(*config.backend(), BackendKind::Sampling);
    /// assert_eq!(config.git().branch_prefix(), "gen-");
    /// assert_eq!(*config.git().max_branch_attempts(), 100);
    /// assert_eq!(*config.generation().max_tokens(), 32768);
    /// ```
    pub fn from_toml_str(toml: &str) -> CoderResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("git.format_commands")
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> CoderResult<Self> {
        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }

    /// Override the code base.
    pub fn with_code_base(mut self, code_base: impl Into<PathBuf>) -> Self {
        self.code_base = Some(code_base.into());
        self
    }

    /// Override the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// The code base, or an error naming how to set it.
    pub fn require_code_base(&self) -> CoderResult<&Path> {
        self.code_base.as_deref().ok_or_else(|| {
            ConfigError::new(format!(
                "code_base is not configured (set it in controller_coder.toml or {}__CODE_BASE)",
                ENV_PREFIX
            ))
            .into()
        })
    }

    /// Settings for the direct backend.
    pub fn direct_config(&self) -> CoderResult<DirectConfig> {
        let config = DirectConfig::builder()
            .fast_model(self.models.fast.clone())
            .strong_model(self.models.strong.clone())
            .max_retries(self.generation.max_retries)
            .initial_backoff_ms(self.generation.initial_backoff_ms)
            .max_delay_secs(self.generation.max_delay_secs)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        Ok(config)
    }
}
