//! System prompts for the four stages.
//!
//! Prompt text is configuration: the bundled defaults can be replaced one by
//! one, and the pipeline never inspects it.

use coder_core::Stage;
use serde::{Deserialize, Serialize};

const CODING_STYLE: &str = include_str!("../prompts/coding_style.md");
const RESOURCE_TYPE: &str = include_str!("../prompts/resource_type.md");
const STORAGE_INTERFACE: &str = include_str!("../prompts/storage_interface.md");
const STORAGE_IMPL: &str = include_str!("../prompts/storage_impl.md");
const CONTROLLER: &str = include_str!("../prompts/controller.md");

/// The system prompt for each stage.
///
/// Missing fields fall back to the bundled defaults when deserialized, so a
/// config file only needs the prompts it overrides.
///
/// # Examples
///
/// ```
/// use coder_core::Stage;
/// use coder_pipeline::Prompts;
///
/// let prompts = Prompts::default();
/// assert!(prompts.for_stage(Stage::StorageImpl).contains("storage_impl_full"));
///
/// let custom = Prompts::default().with_stage(Stage::Controller, "Be brief.");
/// assert_eq!(custom.for_stage(Stage::Controller), "Be brief.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct Prompts {
    /// Stage 1 prompt
    resource_type: String,
    /// Stage 2 prompt
    storage_interface: String,
    /// Stage 3 prompt
    storage_impl: String,
    /// Stage 4 prompt
    controller: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            resource_type: with_style(RESOURCE_TYPE),
            storage_interface: with_style(STORAGE_INTERFACE),
            storage_impl: with_style(STORAGE_IMPL),
            controller: with_style(CONTROLLER),
        }
    }
}

fn with_style(body: &str) -> String {
    format!("{}\n{}", CODING_STYLE, body)
}

impl Prompts {
    /// Prompt text for `stage`.
    pub fn for_stage(&self, stage: Stage) -> &str {
        match stage {
            Stage::ResourceType => &self.resource_type,
            Stage::StorageInterface => &self.storage_interface,
            Stage::StorageImpl => &self.storage_impl,
            Stage::Controller => &self.controller,
        }
    }

    /// Replace the prompt for one stage.
    pub fn with_stage(mut self, stage: Stage, prompt: impl Into<String>) -> Self {
        let slot = match stage {
            Stage::ResourceType => &mut self.resource_type,
            Stage::StorageInterface => &mut self.storage_interface,
            Stage::StorageImpl => &mut self.storage_impl,
            Stage::Controller => &mut self.controller,
        };
        *slot = prompt.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_name_their_output_keys() {
        let prompts = Prompts::default();
        assert!(prompts.resource_type().contains("resource_name:"));
        assert!(prompts.resource_type().contains("go_type:"));
        assert!(prompts.storage_interface().contains("storage_interface_full:"));
        assert!(prompts.storage_impl().contains("storage_impl_full:"));
        assert!(prompts.controller().contains("controller_impl:"));
        assert!(prompts.controller().contains("controller_test:"));
    }

    #[test]
    fn test_defaults_share_style_block() {
        let prompts = Prompts::default();
        for stage in Stage::ALL {
            assert!(prompts.for_stage(stage).starts_with("<coding_style>"));
        }
    }
}
