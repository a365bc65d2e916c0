//! Error types for the controller coder.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use coder_error::{CoderResult, ExtractionError, ExtractionErrorKind};
//!
//! fn parse_output() -> CoderResult<()> {
//!     Err(ExtractionError::new(ExtractionErrorKind::AmbiguousOutput { count: 2 }))?
//! }
//!
//! let err = parse_output().unwrap_err();
//! assert!(format!("{}", err).contains("2 YAML blocks"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod commit;
mod config;
mod error;
mod extraction;
mod gateway;
mod io;
mod pipeline;
mod provider;
mod stage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use commit::{CommitError, CommitErrorKind};
pub use config::ConfigError;
pub use error::{CoderError, CoderErrorKind, CoderResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use gateway::{GatewayError, GatewayErrorKind};
pub use io::IoError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use stage::{StageError, StageErrorKind};
