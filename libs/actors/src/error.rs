//! Actor Runtime Error Types
//!
//! Errors raised by mailboxes, the actor system registry and actor handlers.
//! Protocol-level faults are not errors here: actors report those as plain
//! message payloads.

use crate::address::ActorId;
use thiserror::Error;

/// Main actor runtime error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// The target mailbox has no live receiver
    #[error("Mailbox closed: {actor}")]
    MailboxClosed { actor: String },

    /// A message arrived while the actor had no handler for it
    #[error("Unexpected message in state {state}: {actor} received {kind}")]
    UnexpectedMessage {
        actor: String,
        state: &'static str,
        kind: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// Waiting on a mailbox exceeded its deadline
    #[error("Timeout error: {operation} exceeded {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    /// Actor is not registered with the system
    #[error("Actor not found: {0}")]
    NotFound(ActorId),

    /// Start/stop hook failures
    #[error("Lifecycle error: {actor}: {message}")]
    Lifecycle { actor: String, message: String },
}

/// Result type alias for actor operations
pub type Result<T> = std::result::Result<T, ActorError>;

impl ActorError {
    /// Create a mailbox closed error
    pub fn mailbox_closed(actor: impl Into<String>) -> Self {
        Self::MailboxClosed {
            actor: actor.into(),
        }
    }

    /// Create an unexpected message error
    pub fn unexpected(actor: impl Into<String>, state: &'static str, kind: &'static str) -> Self {
        Self::UnexpectedMessage {
            actor: actor.into(),
            state,
            kind,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: field.map(|s| s.to_string()),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a lifecycle error
    pub fn lifecycle(actor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lifecycle {
            actor: actor.into(),
            message: message.into(),
        }
    }

    /// Short label used as a structured logging field
    pub fn category(&self) -> &'static str {
        match self {
            Self::MailboxClosed { .. } => "mailbox",
            Self::UnexpectedMessage { .. } => "unexpected_message",
            Self::Configuration { .. } => "configuration",
            Self::Timeout { .. } => "timeout",
            Self::NotFound(_) => "not_found",
            Self::Lifecycle { .. } => "lifecycle",
        }
    }

    /// Whether the actor can keep processing after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnexpectedMessage { .. })
    }
}
