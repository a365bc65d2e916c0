//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Conversation participant.
///
/// The system prompt travels separately on [`ModelExchange`](crate::ModelExchange),
/// so only the two conversational roles exist here.
///
/// # Examples
///
/// ```
/// use coder_core::Role;
///
/// assert_eq!(format!("{}", Role::User), "user");
/// assert_ne!(Role::User, Role::Assistant);
/// ```
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
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Input from the caller
    #[display("user")]
    User,
    /// Output from the model
    #[display("assistant")]
    Assistant,
}
