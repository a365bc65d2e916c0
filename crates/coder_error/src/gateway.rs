//! Language-model gateway errors.

/// Gateway failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// The direct provider failed and the retry budget is spent (or the
    /// failure was permanent).
    #[display(
        "Generation unavailable from model '{}' after {} attempt(s): {}",
        model,
        attempts,
        message
    )]
    GenerationUnavailable {
        /// Model that was called
        model: String,
        /// Number of attempts made
        attempts: usize,
        /// Last provider error
        message: String,
    },
    /// The host sampling channel rejected or failed the request.
    #[display("Sampling channel failed: {}", _0)]
    SamplingFailed(String),
}

/// Gateway error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The specific error condition
    pub kind: GatewayErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
