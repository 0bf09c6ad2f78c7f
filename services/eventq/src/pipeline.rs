//! Pipeline Caller
//!
//! Spawns Producer, EventQueue and Consumer on an [`ActorSystem`], wires them
//! together with their start messages and drives round trips from the
//! outside. The caller is the only participant that waits: it blocks on its
//! own inbox, bounded by the configured round-trip timeout.

use crate::consumer::Consumer;
use crate::error::{PipelineError, Result};
use crate::event_queue::EventQueue;
use crate::messages::{
    ConsumerMessage, ConsumerStart, EventQueueMessage, EventQueueStart, ProducerMessage,
    ProducerStart, Value,
};
use crate::producer::Producer;
use actors::{inbox, ActorError, ActorRef, ActorSystem, Inbox};
use bench_config::PipelineSettings;
use tracing::{debug, info, warn};

/// How the caller reads the producer's answer to one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Round trip completed; carries the negated input
    Ack(i64),
    /// Input or acknowledgment was rejected; carries the offending value
    Fault(i64),
}

impl Reply {
    /// Classify `received` as the answer to `sent`
    ///
    /// The producer uses one channel for both outcomes, so only a negative
    /// answer to a positive input counts as an acknowledgment.
    pub fn classify(sent: i64, received: i64) -> Self {
        if sent > 0 && received < 0 {
            Self::Ack(received)
        } else {
            Self::Fault(received)
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Self::Ack(v) | Self::Fault(v) => *v,
        }
    }

    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack(_))
    }
}

/// Outcome of [`Pipeline::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds: u64,
    pub acks: u64,
    pub faults: u64,
    pub last_reply: Option<Reply>,
}

pub struct Pipeline {
    system: ActorSystem,
    producer: ActorRef<ProducerMessage>,
    event_queue: ActorRef<EventQueueMessage>,
    consumer: ActorRef<ConsumerMessage>,
    caller: ActorRef<Value>,
    replies: Inbox<Value>,
    settings: PipelineSettings,
    last_sent: Option<i64>,
}

impl Pipeline {
    /// Spawn and configure the three actors
    ///
    /// Start messages are enqueued before this returns, so every value sent
    /// afterwards is handled by a configured actor.
    pub fn launch(system: &ActorSystem, settings: PipelineSettings) -> Result<Self> {
        let producer = system.spawn("producer", Producer::new())?;
        let event_queue = system.spawn("event-queue", EventQueue::new())?;
        let consumer = system.spawn("consumer", Consumer::new())?;
        let (caller, replies) = inbox::<Value>("caller");

        producer.send(
            ProducerStart {
                caller: caller.clone(),
                consumer: consumer.clone(),
                event_queue: event_queue.clone(),
            }
            .into(),
        )?;
        event_queue.send(
            EventQueueStart {
                caller: caller.clone(),
                producer: producer.clone(),
                consumer: consumer.clone(),
            }
            .into(),
        )?;
        consumer.send(
            ConsumerStart {
                caller: caller.clone(),
                producer: producer.clone(),
                event_queue: event_queue.clone(),
            }
            .into(),
        )?;

        info!(
            system_id = %system.system_id(),
            producer = %producer.id(),
            event_queue = %event_queue.id(),
            consumer = %consumer.id(),
            rounds = settings.rounds,
            initial_value = settings.initial_value,
            "Pipeline launched"
        );

        Ok(Self {
            system: system.clone(),
            producer,
            event_queue,
            consumer,
            caller,
            replies,
            settings,
            last_sent: None,
        })
    }

    pub fn producer(&self) -> &ActorRef<ProducerMessage> {
        &self.producer
    }

    pub fn event_queue(&self) -> &ActorRef<EventQueueMessage> {
        &self.event_queue
    }

    pub fn consumer(&self) -> &ActorRef<ConsumerMessage> {
        &self.consumer
    }

    /// Address the producer reports to
    pub fn caller(&self) -> &ActorRef<Value> {
        &self.caller
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Inject one value into the producer without waiting
    ///
    /// Replies still queued from an earlier value (e.g. one that arrived after
    /// its round trip timed out) are discarded first, so the next reply read
    /// belongs to `amount`.
    pub fn send(&mut self, amount: i64) -> Result<()> {
        let stale = self.replies.drain();
        if !stale.is_empty() {
            let dropped: Vec<i64> = stale.iter().map(|value| value.amount).collect();
            warn!(
                sent = amount,
                previous = ?self.last_sent,
                ?dropped,
                "Discarding stale replies before sending"
            );
        }

        self.producer.send(Value::new(amount).into())?;
        self.last_sent = Some(amount);
        Ok(())
    }

    /// Wait for the next value the producer reports
    pub async fn next_reply(&mut self) -> Result<i64> {
        let timeout = self.settings.round_trip_timeout();
        match self.replies.recv_timeout(timeout).await {
            Ok(value) => Ok(value.amount),
            Err(ActorError::Timeout { timeout_ms, .. }) => Err(PipelineError::NoReply {
                sent: self.last_sent.unwrap_or(self.settings.initial_value),
                timeout_ms,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Send `amount` and wait for exactly one reply
    pub async fn round_trip(&mut self, amount: i64) -> Result<Reply> {
        self.send(amount)?;

        let timeout = self.settings.round_trip_timeout();
        let received = match self.replies.recv_timeout(timeout).await {
            Ok(value) => value.amount,
            Err(ActorError::Timeout { timeout_ms, .. }) => {
                warn!(sent = amount, timeout_ms, "Round trip timed out");
                return Err(PipelineError::NoReply {
                    sent: amount,
                    timeout_ms,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let reply = Reply::classify(amount, received);
        debug!(sent = amount, received, ?reply, "Round trip complete");
        Ok(reply)
    }

    /// Drive `rounds` round trips of `initial_value`
    pub async fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let amount = self.settings.initial_value;

        for _ in 0..self.settings.rounds {
            let reply = self.round_trip(amount).await?;
            if reply.is_ack() {
                summary.acks += 1;
            } else {
                summary.faults += 1;
            }
            summary.rounds += 1;
            summary.last_reply = Some(reply);
        }

        info!(
            rounds = summary.rounds,
            acks = summary.acks,
            faults = summary.faults,
            "Pipeline run finished"
        );
        Ok(summary)
    }

    /// Stop the three actors
    pub async fn shutdown(self) -> Result<()> {
        for id in [self.producer.id(), self.event_queue.id(), self.consumer.id()] {
            self.system.stop_actor(&id).await?;
        }
        info!(system_id = %self.system.system_id(), "Pipeline shut down");
        Ok(())
    }
}
