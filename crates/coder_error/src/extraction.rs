//! Errors raised while pulling a structured payload out of model output.

/// Specific extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// More than one fenced YAML block was found; none of them were parsed.
    #[display("Model output is ambiguous: found {} YAML blocks, expected at most one", count)]
    AmbiguousOutput {
        /// Number of fenced blocks found
        count: usize,
    },
    /// The candidate payload is not valid YAML.
    #[display("Failed to parse YAML: {}\n\n{}", message, payload)]
    MalformedPayload {
        /// Parser diagnostic
        message: String,
        /// The text that failed to parse
        payload: String,
    },
}

/// Extraction error with location tracking.
///
/// # Examples
///
/// ```
/// use coder_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::MalformedPayload {
///     message: "did not find expected key".to_string(),
///     payload: "a: [".to_string(),
/// });
/// assert!(format!("{}", err).contains("a: ["));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
