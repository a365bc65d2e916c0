//! Message types for conversation turns.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text turn in a conversation.
///
/// # Examples
///
/// ```
/// use coder_core::{Message, Role};
///
/// let message = Message::user("<input_resource_name>role</input_resource_name>");
/// assert_eq!(*message.role(), Role::User);
/// assert!(message.text().contains("role"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The text content of the turn
    text: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}
