//! Errors raised while assembling requests and settings.

/// What went wrong while assembling a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A generated builder refused to build (unset or invalid field)
    #[display("Incomplete value: {}", _0)]
    Incomplete(String),

    /// A resource name that cannot be used in file paths or branch names
    #[display(
        "'{}' is not a usable resource name (ASCII letters, digits, '_' and '-' only)",
        _0
    )]
    InvalidResourceName(String),
}

/// Builder error with location tracking.
///
/// # Examples
///
/// ```
/// use coder_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::from("`sql_schema` must be initialized".to_string());
/// assert!(matches!(err.kind(), BuilderErrorKind::Incomplete(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a builder error at the caller's location.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

/// `derive_builder` build errors arrive as their message.
impl From<String> for BuilderError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(BuilderErrorKind::Incomplete(msg))
    }
}
