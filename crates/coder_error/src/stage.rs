//! Stage output validation errors.

/// Specific stage failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StageErrorKind {
    /// The parsed payload does not match the shape the stage requires.
    #[display(
        "Stage '{}' output violates its schema (missing: [{}], mistyped: [{}])",
        stage,
        missing.join(", "),
        mistyped.join(", ")
    )]
    SchemaViolation {
        /// Stage name
        stage: String,
        /// Required fields absent from the payload
        missing: Vec<String>,
        /// Fields present but not of the declared type
        mistyped: Vec<String>,
    },
}

/// Stage error with location tracking.
///
/// # Examples
///
/// ```
/// use coder_error::{StageError, StageErrorKind};
///
/// let err = StageError::new(StageErrorKind::SchemaViolation {
///     stage: "resource_type".to_string(),
///     missing: vec!["go_type".to_string()],
///     mistyped: vec![],
/// });
/// assert!(format!("{}", err).contains("missing: [go_type]"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Stage Error: {} at line {} in {}", kind, line, file)]
pub struct StageError {
    /// The specific error condition
    pub kind: StageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StageError {
    /// Create a new StageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
