//! EventQueue Actor
//!
//! Sits between Producer and Consumer. Downstream values are pushed onto the
//! producer-side queue and upstream values onto the consumer-side queue;
//! each push is followed in the same handler invocation by popping the
//! front of that queue and forwarding it. Both queues are therefore empty
//! between messages and the actor behaves as an order-preserving relay.
//!
//! Reordering, batching or backpressure belong between the push and the
//! pop in [`EventQueue::route`]; neither endpoint's protocol would change.

use crate::messages::{Direction, EventQueueMessage, EventQueueStart, Value};
use actors::{async_trait, ActorBehavior, ActorError, Message, Result};
use std::collections::VecDeque;
use tracing::{debug, info};

const ACTOR: &str = "event-queue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventQueueState {
    #[default]
    Uninitialized,
    Routing,
}

impl EventQueueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Routing => "Routing",
        }
    }
}

#[derive(Debug, Default)]
pub struct EventQueue {
    state: EventQueueState,
    peers: Option<EventQueueStart>,
    /// Producer to consumer
    producer_queue: VecDeque<i64>,
    /// Consumer to producer
    consumer_queue: VecDeque<i64>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EventQueueState {
        self.state
    }

    pub fn peers(&self) -> Option<&EventQueueStart> {
        self.peers.as_ref()
    }

    /// Values held back as `(producer_queue, consumer_queue)`
    pub fn pending(&self) -> (usize, usize) {
        (self.producer_queue.len(), self.consumer_queue.len())
    }

    /// Apply one message to the state machine
    pub fn dispatch(&mut self, msg: EventQueueMessage) -> Result<()> {
        match (self.state, msg) {
            (EventQueueState::Uninitialized, EventQueueMessage::Start(start)) => {
                info!(
                    caller = %start.caller.id(),
                    producer = %start.producer.id(),
                    consumer = %start.consumer.id(),
                    "EventQueue configured"
                );
                self.peers = Some(start);
                self.state = EventQueueState::Routing;
                Ok(())
            }
            (EventQueueState::Routing, EventQueueMessage::Value(value)) => self.route(value),
            (state, msg) => Err(ActorError::unexpected(ACTOR, state.as_str(), msg.kind())),
        }
    }

    fn route(&mut self, value: Value) -> Result<()> {
        let Some(peers) = self.peers.as_ref() else {
            return Err(ActorError::lifecycle(ACTOR, "value handled before Start"));
        };

        match value.direction {
            Direction::Downstream => {
                debug!(amount = value.amount, "Queued value from producer");
                self.producer_queue.push_back(value.amount);

                if let Some(amount) = self.producer_queue.pop_front() {
                    peers.consumer.send(Value::downstream(amount).into())?;
                }
            }
            Direction::Upstream => {
                debug!(amount = value.amount, "Queued value from consumer");
                self.consumer_queue.push_back(value.amount);

                if let Some(amount) = self.consumer_queue.pop_front() {
                    peers.producer.send(Value::upstream(amount).into())?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActorBehavior for EventQueue {
    type Message = EventQueueMessage;

    async fn handle(&mut self, msg: EventQueueMessage) -> Result<()> {
        self.dispatch(msg)
    }
}
