//! Actor-Based Message Passing Runtime
//!
//! Minimal actor runtime for eventq: every actor owns one mailbox, drained by
//! one tokio task, and is reachable only through an [`ActorRef`]. Sends are
//! asynchronous and never block the sender; per-actor delivery order is FIFO.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  send(msg)  ┌───────────────┐  recv()  ┌──────────────────┐
//! │  ActorRef<M> │────────────▶│  Mailbox<M>   │─────────▶│ ActorTask        │
//! │  (address)   │             │  unbounded    │          │  behavior.handle │
//! └──────────────┘             └───────────────┘          └──────────────────┘
//! ```
//!
//! A message an actor has no handler for in its current state is returned as
//! [`ActorError::UnexpectedMessage`]; the task logs it, counts it in
//! [`SystemMetrics`] and keeps going.
//!
//! # Examples
//!
//! ```rust,no_run
//! use actors::{async_trait, ActorBehavior, ActorSystem, Message, Result};
//!
//! #[derive(Debug)]
//! struct Greeting(String);
//!
//! impl Message for Greeting {}
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl ActorBehavior for Greeter {
//!     type Message = Greeting;
//!
//!     async fn handle(&mut self, msg: Greeting) -> Result<()> {
//!         tracing::info!("Received: {}", msg.0);
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<()> {
//! let system = ActorSystem::new();
//! let greeter = system.spawn("greeter", Greeter)?;
//! greeter.send(Greeting("Hello, Actor!".to_string()))?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod error;
pub mod mailbox;
pub mod system;

pub use address::{ActorId, ActorRef, Message};
pub use error::{ActorError, Result};
pub use mailbox::{inbox, Inbox, Mailbox, MailboxReceiver};
pub use system::{
    ActorBehavior, ActorHandle, ActorStatus, ActorSystem, SupervisorDirective, SystemMetrics,
    SystemStats,
};

pub use async_trait::async_trait;
