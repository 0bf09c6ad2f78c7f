//! eventq - actor round-trip pipeline
//!
//! Three actors relay an integer and its acknowledgment:
//!
//! ```text
//!  caller ──v──▶ Producer ──v──▶ EventQueue ──v──▶ Consumer
//!    ▲              │  ▲                │  ▲            │
//!    └────-v────────┘  └──────-v────────┘  └─────-v─────┘
//! ```
//!
//! The Producer accepts a positive value, forwards it and waits for the
//! negated value to come back before it reports to the caller. The
//! EventQueue relays in both directions, and the Consumer negates.
//! [`Pipeline`] spawns and wires the actors and drives round trips.

pub mod consumer;
pub mod error;
pub mod event_queue;
pub mod messages;
pub mod pipeline;
pub mod producer;

pub use consumer::{Consumer, ConsumerState};
pub use error::{PipelineError, Result};
pub use event_queue::{EventQueue, EventQueueState};
pub use messages::{
    ConsumerMessage, ConsumerStart, Direction, EventQueueMessage, EventQueueStart,
    ProducerMessage, ProducerStart, Value,
};
pub use pipeline::{Pipeline, Reply, RunSummary};
pub use producer::{Producer, ProducerState};
