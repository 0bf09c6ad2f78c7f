//! Consumer Actor
//!
//! Negates every value it receives and hands it back to the event queue as
//! an upstream value. Negation wraps, so `i64::MIN` comes back unchanged.

use crate::messages::{ConsumerMessage, ConsumerStart, Value};
use actors::{async_trait, ActorBehavior, ActorError, Message, Result};
use tracing::{debug, info};

const ACTOR: &str = "consumer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumerState {
    #[default]
    Uninitialized,
    Active,
}

impl ConsumerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Active => "Active",
        }
    }
}

#[derive(Debug, Default)]
pub struct Consumer {
    state: ConsumerState,
    peers: Option<ConsumerStart>,
}

impl Consumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    pub fn peers(&self) -> Option<&ConsumerStart> {
        self.peers.as_ref()
    }

    /// Apply one message to the state machine
    pub fn dispatch(&mut self, msg: ConsumerMessage) -> Result<()> {
        match (self.state, msg) {
            (ConsumerState::Uninitialized, ConsumerMessage::Start(start)) => {
                info!(
                    caller = %start.caller.id(),
                    producer = %start.producer.id(),
                    event_queue = %start.event_queue.id(),
                    "Consumer configured"
                );
                self.peers = Some(start);
                self.state = ConsumerState::Active;
                Ok(())
            }
            (ConsumerState::Active, ConsumerMessage::Value(value)) => self.consume(value),
            (state, msg) => Err(ActorError::unexpected(ACTOR, state.as_str(), msg.kind())),
        }
    }

    fn consume(&self, value: Value) -> Result<()> {
        let Some(peers) = self.peers.as_ref() else {
            return Err(ActorError::lifecycle(ACTOR, "value handled before Start"));
        };

        let negated = value.amount.wrapping_neg();
        debug!(amount = value.amount, negated, "Consumer returning value");
        peers.event_queue.send(Value::upstream(negated).into())
    }
}

#[async_trait]
impl ActorBehavior for Consumer {
    type Message = ConsumerMessage;

    async fn handle(&mut self, msg: ConsumerMessage) -> Result<()> {
        self.dispatch(msg)
    }
}
