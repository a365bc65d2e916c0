//! Results of a controller generation request.

use coder_core::ArtifactSet;
use serde::{Deserialize, Serialize};

/// What `generate_controller` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Files were generated but not committed
    Artifacts {
        /// The generated files
        artifacts: ArtifactSet,
    },
    /// Files were committed and pushed to a new branch
    Committed {
        /// Branch holding the commit
        branch_name: String,
        /// The committed files
        artifacts: ArtifactSet,
    },
}

impl GenerationOutcome {
    /// The generated files, committed or not.
    pub fn artifacts(&self) -> &ArtifactSet {
        match self {
            GenerationOutcome::Artifacts { artifacts } => artifacts,
            GenerationOutcome::Committed { artifacts, .. } => artifacts,
        }
    }

    /// Branch name when the files were committed.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Artifacts { .. } => None,
            GenerationOutcome::Committed { branch_name, .. } => Some(branch_name),
        }
    }
}
