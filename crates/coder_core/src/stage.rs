//! Pipeline stage identifiers.

use serde::{Deserialize, Serialize};

/// The four generation stages, in dependency order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Go type definition from schema + state machine
    #[display("resource_type")]
    ResourceType,
    /// Storage interface rewrite
    #[display("storage_interface")]
    StorageInterface,
    /// Storage implementation rewrite
    #[display("storage_impl")]
    StorageImpl,
    /// Controller implementation and tests
    #[display("controller")]
    Controller,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::ResourceType,
        Stage::StorageInterface,
        Stage::StorageImpl,
        Stage::Controller,
    ];
}
