//! Actor mailboxes.
//!
//! Every actor owns exactly one unbounded mailbox drained by a single task,
//! which is what serializes handler execution per actor. Sending never
//! blocks and never waits for the receiver.

use crate::address::{ActorId, ActorRef, Message};
use crate::error::{ActorError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Sending half of an actor mailbox
#[derive(Debug)]
pub struct Mailbox<M: Message> {
    sender: mpsc::UnboundedSender<M>,
}

impl<M: Message> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Receiving half, owned by the actor task
#[derive(Debug)]
pub struct MailboxReceiver<M: Message> {
    receiver: mpsc::UnboundedReceiver<M>,
}

impl<M: Message> Mailbox<M> {
    pub fn new() -> (Self, MailboxReceiver<M>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, MailboxReceiver { receiver })
    }

    /// Enqueue without waiting; fails only once the receiver is gone
    pub fn send(&self, msg: M, actor: &str) -> Result<()> {
        self.sender
            .send(msg)
            .map_err(|_| ActorError::mailbox_closed(actor))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<M: Message> MailboxReceiver<M> {
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<M> {
        self.receiver.try_recv().ok()
    }
}

/// Mailbox with no actor behind it, read directly by external code
///
/// Used by whoever drives the actors from outside the system (the caller
/// of a pipeline, or a test standing in for a peer).
#[derive(Debug)]
pub struct Inbox<M: Message> {
    id: ActorId,
    name: Arc<str>,
    receiver: MailboxReceiver<M>,
}

/// Create a detached address and the inbox that receives its messages
pub fn inbox<M: Message>(name: &str) -> (ActorRef<M>, Inbox<M>) {
    let id = ActorId::new();
    let name: Arc<str> = Arc::from(name);
    let (mailbox, receiver) = Mailbox::new();
    let address = ActorRef::new(id, Arc::clone(&name), mailbox);
    (address, Inbox { id, name, receiver })
}

impl<M: Message> Inbox<M> {
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the next message; `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    /// Take a message if one is already queued
    pub fn try_recv(&mut self) -> Option<M> {
        self.receiver.try_recv()
    }

    /// Wait for the next message, giving up after `timeout`
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<M> {
        match tokio::time::timeout(timeout, self.receiver.recv()).await {
            Ok(Some(msg)) => Ok(msg),
            Ok(None) => Err(ActorError::mailbox_closed(self.name.as_ref())),
            Err(_) => Err(ActorError::timeout(
                format!("recv on {}", self.name),
                timeout.as_millis() as u64,
            )),
        }
    }

    /// Collect everything currently queued
    pub fn drain(&mut self) -> Vec<M> {
        let mut out = Vec::new();
        while let Some(msg) = self.receiver.try_recv() {
            out.push(msg);
        }
        out
    }
}
