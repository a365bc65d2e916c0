//! Pipeline input.

use serde::{Deserialize, Serialize};

/// Immutable input to one pipeline run.
///
/// `sql_schema` and `state_machine` are free text, expected (not enforced) to
/// be a SQL `CREATE TYPE`/`CREATE TABLE` block and a mermaid `stateDiagram-v2`.
/// The two `current_*` fields carry the present content of the evolving
/// storage files; when absent the stages see empty text.
///
/// # Examples
///
/// ```
/// use coder_core::GenerationRequest;
///
/// let request = GenerationRequest::builder()
///     .sql_schema("CREATE TABLE api.workspaces (id SERIAL PRIMARY KEY);")
///     .state_machine("stateDiagram-v2\n    [*] --> PENDING")
///     .current_storage_interface("package storage")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.current_storage_interface_text(), "package storage");
/// assert_eq!(request.current_storage_impl_text(), "");
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
pub struct GenerationRequest {
    /// Relational schema description
    sql_schema: String,
    /// State-transition description
    state_machine: String,
    /// Current content of the storage interface source
    #[builder(default, setter(strip_option))]
    current_storage_interface: Option<String>,
    /// Current content of the storage implementation source
    #[builder(default, setter(strip_option))]
    current_storage_impl: Option<String>,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Current storage interface source, empty when not supplied.
    pub fn current_storage_interface_text(&self) -> &str {
        self.current_storage_interface.as_deref().unwrap_or_default()
    }

    /// Current storage implementation source, empty when not supplied.
    pub fn current_storage_impl_text(&self) -> &str {
        self.current_storage_impl.as_deref().unwrap_or_default()
    }
}
