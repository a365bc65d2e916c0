//! Commit automation settings.

use serde::{Deserialize, Serialize};

/// Branch naming, committer identity and formatting commands.
///
/// # Examples
///
/// ```
/// use coder_git::CommitSettings;
///
/// let settings = CommitSettings::default();
/// assert_eq!(settings.branch_prefix(), "ai-impl-");
/// assert_eq!(*settings.max_branch_attempts(), 100);
/// assert_eq!(settings.format_commands(), &vec!["make mockgen".to_string(), "make fmt".to_string()]);
///
/// let custom = CommitSettings::builder()
///     .branch_prefix("gen-")
///     .format_commands(Vec::<String>::new())
///     .build()
///     .unwrap();
/// assert_eq!(custom.branch_name("role", 0), "gen-role");
/// assert_eq!(custom.branch_name("role", 3), "gen-role-3");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
#[serde(default)]
pub struct CommitSettings {
    /// Prefix for generated branch names
    #[builder(default = "\"ai-impl-\".to_string()")]
    branch_prefix: String,
    /// Number of candidate names checked before giving up
    #[builder(default = "100")]
    max_branch_attempts: usize,
    /// `git config user.name` for generated commits
    #[builder(default = "\"neutree-ai-coder\".to_string()")]
    user_name: String,
    /// `git config user.email` for generated commits
    #[builder(default = "\"neutree-ai-coder@arcfra.com\".to_string()")]
    user_email: String,
    /// Remote that is checked for existing branches and pushed to
    #[builder(default = "\"origin\".to_string()")]
    remote: String,
    /// Start point for new branches; the current HEAD when unset
    #[builder(default, setter(strip_option))]
    base_ref: Option<String>,
    /// Commands run after the files are written, in order.
    ///
    /// Each entry is split on whitespace into a program and its arguments.
    /// There is no shell quoting: wrap anything that needs it in a script or
    /// a make target.
    #[builder(default = "vec![\"make mockgen\".to_string(), \"make fmt\".to_string()]")]
    format_commands: Vec<String>,
}

impl Default for CommitSettings {
    fn default() -> Self {
        Self {
            branch_prefix: "ai-impl-".to_string(),
            max_branch_attempts: 100,
            user_name: "neutree-ai-coder".to_string(),
            user_email: "neutree-ai-coder@arcfra.com".to_string(),
            remote: "origin".to_string(),
            base_ref: None,
            format_commands: vec!["make mockgen".to_string(), "make fmt".to_string()],
        }
    }
}

impl CommitSettings {
    /// Creates a new settings builder.
    pub fn builder() -> CommitSettingsBuilder {
        CommitSettingsBuilder::default()
    }

    /// Candidate branch name: the bare name first, then `-1`, `-2`, ...
    pub fn branch_name(&self, resource_name: &str, attempt: usize) -> String {
        if attempt == 0 {
            format!("{}{}", self.branch_prefix, resource_name)
        } else {
            format!("{}{}-{}", self.branch_prefix, resource_name, attempt)
        }
    }

    /// Commit message for a resource.
    pub fn commit_message(&self, resource_name: &str) -> String {
        format!("feat: (ai-gen) impl the {} controller", resource_name)
    }
}
