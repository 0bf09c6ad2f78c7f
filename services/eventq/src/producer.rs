//! Producer Actor
//!
//! Accepts values from the caller, relays positive ones to the event queue
//! and then refuses new input until the round trip comes back as a negative
//! acknowledgment.
//!
//! ```text
//! Uninitialized ──Start──▶ Ready ──Value(v > 0)──▶ AwaitingAck
//!                            ▲                         │
//!                            └──────Value(v < 0)───────┘
//! ```
//!
//! Malformed input (`v <= 0` while Ready) and malformed acks (`v >= 0` while
//! AwaitingAck) are sent to the caller unchanged and cause no transition.
//! A malformed ack therefore leaves the producer waiting for another ack.

use crate::messages::{ProducerMessage, ProducerStart, Value};
use actors::{async_trait, ActorBehavior, ActorError, Message, Result};
use tracing::{debug, info, warn};

const ACTOR: &str = "producer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProducerState {
    #[default]
    Uninitialized,
    Ready,
    AwaitingAck,
}

impl ProducerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Ready => "Ready",
            Self::AwaitingAck => "AwaitingAck",
        }
    }
}

#[derive(Debug, Default)]
pub struct Producer {
    state: ProducerState,
    peers: Option<ProducerStart>,
}

impl Producer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProducerState {
        self.state
    }

    pub fn peers(&self) -> Option<&ProducerStart> {
        self.peers.as_ref()
    }

    /// Apply one message to the state machine
    pub fn dispatch(&mut self, msg: ProducerMessage) -> Result<()> {
        match (self.state, msg) {
            (ProducerState::Uninitialized, ProducerMessage::Start(start)) => {
                self.configure(start);
                Ok(())
            }
            (ProducerState::Ready, ProducerMessage::Value(value)) => self.receive(value),
            (ProducerState::AwaitingAck, ProducerMessage::Value(value)) => {
                self.wait_for_ack(value)
            }
            (state, msg) => Err(ActorError::unexpected(ACTOR, state.as_str(), msg.kind())),
        }
    }

    fn configure(&mut self, start: ProducerStart) {
        info!(
            caller = %start.caller.id(),
            event_queue = %start.event_queue.id(),
            consumer = %start.consumer.id(),
            "Producer configured"
        );
        self.peers = Some(start);
        self.state = ProducerState::Ready;
    }

    fn receive(&mut self, value: Value) -> Result<()> {
        let peers = self.configured()?;

        if value.amount > 0 {
            debug!(amount = value.amount, "Producer forwarding value to event queue");
            peers.event_queue.send(Value::downstream(value.amount).into())?;
            self.state = ProducerState::AwaitingAck;
        } else {
            warn!(
                amount = value.amount,
                "Producer rejected non-positive input, reporting to caller"
            );
            peers.caller.send(value)?;
        }
        Ok(())
    }

    fn wait_for_ack(&mut self, value: Value) -> Result<()> {
        let peers = self.configured()?;

        if value.amount < 0 {
            debug!(amount = value.amount, "Producer received ack");
            peers.caller.send(value)?;
            self.state = ProducerState::Ready;
        } else {
            warn!(
                amount = value.amount,
                "Producer received malformed ack, still awaiting ack"
            );
            peers.caller.send(value)?;
        }
        Ok(())
    }

    fn configured(&self) -> Result<&ProducerStart> {
        self.peers
            .as_ref()
            .ok_or_else(|| ActorError::lifecycle(ACTOR, "value handled before Start"))
    }
}

#[async_trait]
impl ActorBehavior for Producer {
    type Message = ProducerMessage;

    async fn handle(&mut self, msg: ProducerMessage) -> Result<()> {
        self.dispatch(msg)
    }
}
