//! Tracing subscriber setup for the binary.

use coder_error::{CoderResult, ConfigError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` decides the filter when set; INFO is the fallback. `verbose`
/// raises the floor to DEBUG either way. Stdout is left for generated output.
pub fn init_logging(verbose: bool, format: LogFormat) -> CoderResult<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(verbose, rust_log.as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)).into())
}

fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(Level::INFO.as_str()));

    if verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    }
}
