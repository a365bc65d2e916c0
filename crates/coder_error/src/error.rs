//! Top-level error wrapper types.

use crate::{
    BuilderError, CommitError, ConfigError, ExtractionError, GatewayError, IoError, PipelineError,
    ProviderError, StageError,
};

/// Every error the controller coder can surface.
///
/// # Examples
///
/// ```
/// use coder_error::{CoderError, ConfigError};
///
/// let err: CoderError = ConfigError::new("missing code_base").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CoderErrorKind {
    /// Structured payload could not be extracted from model output
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Stage output failed shape validation
    #[from(StageError)]
    Stage(StageError),
    /// Language-model gateway failure
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Raw provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Orchestrator invariant failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Commit automation failure
    #[from(CommitError)]
    Commit(CommitError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// File system error
    #[from(IoError)]
    Io(IoError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Controller coder error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Controller Coder Error: {}", _0)]
pub struct CoderError(Box<CoderErrorKind>);

impl CoderError {
    /// Create a new error from a kind.
    pub fn new(kind: CoderErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CoderErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CoderErrorKind
impl<T> From<T> for CoderError
where
    T: Into<CoderErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for controller coder operations.
pub type CoderResult<T> = std::result::Result<T, CoderError>;
