//! Pipeline Messages
//!
//! Each actor has its own mailbox type: a one-time `Start` carrying the
//! addresses of its collaborators, then any number of `Value`s. Values carry
//! an explicit [`Direction`] so routing never depends on interpreting zero.

use actors::{ActorRef, Message};

/// Which way a value is travelling through the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Producer towards Consumer
    Downstream,
    /// Consumer back towards Producer
    Upstream,
}

impl Direction {
    /// Classify an untagged amount: positive is downstream, everything else
    /// (zero included) is upstream
    pub fn of(amount: i64) -> Self {
        if amount > 0 {
            Self::Downstream
        } else {
            Self::Upstream
        }
    }
}

/// Integer payload relayed between the actors and reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value {
    pub amount: i64,
    pub direction: Direction,
}

impl Value {
    /// Value whose direction is derived from the sign of `amount`
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            direction: Direction::of(amount),
        }
    }

    pub fn downstream(amount: i64) -> Self {
        Self {
            amount,
            direction: Direction::Downstream,
        }
    }

    pub fn upstream(amount: i64) -> Self {
        Self {
            amount,
            direction: Direction::Upstream,
        }
    }
}

impl From<i64> for Value {
    fn from(amount: i64) -> Self {
        Self::new(amount)
    }
}

impl Message for Value {
    fn kind(&self) -> &'static str {
        "Value"
    }
}

/// Collaborators handed to the Producer
#[derive(Debug, Clone)]
pub struct ProducerStart {
    pub caller: ActorRef<Value>,
    pub consumer: ActorRef<ConsumerMessage>,
    pub event_queue: ActorRef<EventQueueMessage>,
}

/// Collaborators handed to the EventQueue
#[derive(Debug, Clone)]
pub struct EventQueueStart {
    pub caller: ActorRef<Value>,
    pub producer: ActorRef<ProducerMessage>,
    pub consumer: ActorRef<ConsumerMessage>,
}

/// Collaborators handed to the Consumer
#[derive(Debug, Clone)]
pub struct ConsumerStart {
    pub caller: ActorRef<Value>,
    pub producer: ActorRef<ProducerMessage>,
    pub event_queue: ActorRef<EventQueueMessage>,
}

#[derive(Debug)]
pub enum ProducerMessage {
    Start(ProducerStart),
    Value(Value),
}

#[derive(Debug)]
pub enum EventQueueMessage {
    Start(EventQueueStart),
    Value(Value),
}

#[derive(Debug)]
pub enum ConsumerMessage {
    Start(ConsumerStart),
    Value(Value),
}

macro_rules! actor_message {
    ($message:ident, $start:ident) => {
        impl Message for $message {
            fn kind(&self) -> &'static str {
                match self {
                    Self::Start(_) => "Start",
                    Self::Value(_) => "Value",
                }
            }
        }

        impl From<$start> for $message {
            fn from(start: $start) -> Self {
                Self::Start(start)
            }
        }

        impl From<Value> for $message {
            fn from(value: Value) -> Self {
                Self::Value(value)
            }
        }
    };
}

actor_message!(ProducerMessage, ProducerStart);
actor_message!(EventQueueMessage, EventQueueStart);
actor_message!(ConsumerMessage, ConsumerStart);
