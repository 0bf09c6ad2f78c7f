//! Pipeline error types

use actors::ActorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Runtime failure while spawning, configuring or messaging actors,
    /// including a closed actor mailbox
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// The producer did not answer a round trip in time
    #[error("No reply for value {sent} within {timeout_ms}ms")]
    NoReply { sent: i64, timeout_ms: u64 },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
