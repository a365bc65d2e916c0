//! Pulling a YAML payload out of free-form model output.
//!
//! Models are asked to answer with a single fenced YAML block, but they
//! sometimes skip the fence or add prose around it. The rules:
//!
//! 1. More than one fenced block is ambiguous and fails without parsing.
//! 2. Exactly one block: its trimmed body is the payload.
//! 3. No block: the whole trimmed response is the payload.

use coder_error::{CoderResult, ExtractionError, ExtractionErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static YAML_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```yaml\n([\s\S]*?)\n```").expect("Valid YAML fence regex"));

/// Find the payload text without parsing it.
///
/// # Errors
///
/// Returns [`ExtractionErrorKind::AmbiguousOutput`] when the response holds
/// more than one fenced YAML block.
pub fn yaml_payload(response: &str) -> CoderResult<&str> {
    let bodies: Vec<&str> = YAML_FENCE
        .captures_iter(response)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    match bodies.as_slice() {
        [] => Ok(response.trim()),
        [body] => Ok(body.trim()),
        _ => {
            tracing::warn!(count = bodies.len(), "Multiple YAML blocks in model output");
            Err(ExtractionError::new(ExtractionErrorKind::AmbiguousOutput {
                count: bodies.len(),
            })
            .into())
        }
    }
}

/// Extract and parse the YAML payload of a model response.
///
/// The result is untyped; each stage checks the shape it needs.
///
/// # Errors
///
/// - [`ExtractionErrorKind::AmbiguousOutput`] for two or more fenced blocks.
/// - [`ExtractionErrorKind::MalformedPayload`] when the payload is not YAML.
///
/// # Examples
///
/// ```
/// use coder_pipeline::extract_yaml;
///
/// let response = "Here you go:\n```yaml\nresource_name: workspace\ngo_type: |\n  type Workspace struct{}\n```\n";
/// let value = extract_yaml(response).unwrap();
/// assert_eq!(value["resource_name"].as_str(), Some("workspace"));
/// ```
pub fn extract_yaml(response: &str) -> CoderResult<serde_yaml::Value> {
    let payload = yaml_payload(response)?;
    serde_yaml::from_str(payload).map_err(|e| {
        tracing::error!(error = %e, payload_length = payload.len(), "Failed to parse YAML payload");
        ExtractionError::new(ExtractionErrorKind::MalformedPayload {
            message: e.to_string(),
            payload: payload.to_string(),
        })
        .into()
    })
}
