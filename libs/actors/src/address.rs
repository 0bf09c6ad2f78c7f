//! Actor Addressing
//!
//! An [`ActorRef`] is the only way to reach an actor: an opaque identity plus
//! a typed sender into the actor's mailbox. Holding one grants the ability to
//! send, nothing more; it never owns or keeps the actor alive.

use crate::error::Result;
use crate::mailbox::Mailbox;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Unique actor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId {
    id: Uuid,
}

impl ActorId {
    /// Create new actor ID
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Create from UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self { id }
    }

    /// Get UUID
    pub fn uuid(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.id.simple())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Message accepted by an actor mailbox
pub trait Message: Send + fmt::Debug + 'static {
    /// Label naming the shape of this message, used when reporting a
    /// message that arrived in a state with no handler for it
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Location-transparent handle to an actor's mailbox
pub struct ActorRef<M: Message> {
    id: ActorId,
    name: Arc<str>,
    mailbox: Mailbox<M>,
}

impl<M: Message> ActorRef<M> {
    pub(crate) fn new(id: ActorId, name: Arc<str>, mailbox: Mailbox<M>) -> Self {
        Self { id, name, mailbox }
    }

    /// Enqueue a message and return immediately
    pub fn send(&self, msg: M) -> Result<()> {
        self.mailbox.send(msg, &self.name)
    }

    /// Get actor ID
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Name the actor was spawned under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the receiving side of the mailbox is still alive
    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_closed()
    }
}

impl<M: Message> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<M: Message> PartialEq for ActorRef<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<M: Message> Eq for ActorRef<M> {}

impl<M: Message> Hash for ActorRef<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<M: Message> fmt::Debug for ActorRef<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
