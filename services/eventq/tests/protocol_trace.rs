//! Step-by-step traces of the relay protocol
//!
//! Each actor's state machine is driven by hand and inboxes stand in for the
//! mailboxes, so every hop and every intermediate state can be checked.

use actors::{inbox, Inbox};
use eventq::{
    Consumer, ConsumerMessage, ConsumerStart, ConsumerState, Direction, EventQueue,
    EventQueueMessage, EventQueueStart, EventQueueState, Producer, ProducerMessage,
    ProducerStart, ProducerState, Value,
};

struct Harness {
    producer: Producer,
    event_queue: EventQueue,
    consumer: Consumer,
    caller_rx: Inbox<Value>,
    producer_rx: Inbox<ProducerMessage>,
    event_queue_rx: Inbox<EventQueueMessage>,
    consumer_rx: Inbox<ConsumerMessage>,
}

impl Harness {
    fn started() -> Self {
        let (caller, caller_rx) = inbox::<Value>("caller");
        let (producer_ref, producer_rx) = inbox::<ProducerMessage>("producer");
        let (event_queue_ref, event_queue_rx) = inbox::<EventQueueMessage>("event-queue");
        let (consumer_ref, consumer_rx) = inbox::<ConsumerMessage>("consumer");

        let mut producer = Producer::new();
        let mut event_queue = EventQueue::new();
        let mut consumer = Consumer::new();

        producer
            .dispatch(
                ProducerStart {
                    caller: caller.clone(),
                    consumer: consumer_ref.clone(),
                    event_queue: event_queue_ref.clone(),
                }
                .into(),
            )
            .unwrap();
        event_queue
            .dispatch(
                EventQueueStart {
                    caller: caller.clone(),
                    producer: producer_ref.clone(),
                    consumer: consumer_ref,
                }
                .into(),
            )
            .unwrap();
        consumer
            .dispatch(
                ConsumerStart {
                    caller,
                    producer: producer_ref,
                    event_queue: event_queue_ref,
                }
                .into(),
            )
            .unwrap();

        Self {
            producer,
            event_queue,
            consumer,
            caller_rx,
            producer_rx,
            event_queue_rx,
            consumer_rx,
        }
    }

    /// Deliver the one message waiting in the event queue's mailbox
    fn step_event_queue(&mut self) -> Value {
        let msg = self.event_queue_rx.try_recv().expect("event queue mailbox empty");
        let value = match &msg {
            EventQueueMessage::Value(value) => *value,
            other => panic!("unexpected {:?}", other),
        };
        self.event_queue.dispatch(msg).unwrap();
        value
    }

    fn step_consumer(&mut self) -> Value {
        let msg = self.consumer_rx.try_recv().expect("consumer mailbox empty");
        let value = match &msg {
            ConsumerMessage::Value(value) => *value,
            other => panic!("unexpected {:?}", other),
        };
        self.consumer.dispatch(msg).unwrap();
        value
    }

    fn step_producer(&mut self) -> Value {
        let msg = self.producer_rx.try_recv().expect("producer mailbox empty");
        let value = match &msg {
            ProducerMessage::Value(value) => *value,
            other => panic!("unexpected {:?}", other),
        };
        self.producer.dispatch(msg).unwrap();
        value
    }

    fn all_mailboxes_empty(&mut self) -> bool {
        self.caller_rx.try_recv().is_none()
            && self.producer_rx.try_recv().is_none()
            && self.event_queue_rx.try_recv().is_none()
            && self.consumer_rx.try_recv().is_none()
    }
}

#[test]
fn positive_value_makes_full_round_trip() {
    let mut h = Harness::started();
    assert_eq!(h.producer.state(), ProducerState::Ready);
    assert_eq!(h.event_queue.state(), EventQueueState::Routing);
    assert_eq!(h.consumer.state(), ConsumerState::Active);

    h.producer.dispatch(Value::new(5).into()).unwrap();
    assert_eq!(h.producer.state(), ProducerState::AwaitingAck);

    let hop = h.step_event_queue();
    assert_eq!((hop.amount, hop.direction), (5, Direction::Downstream));
    assert_eq!(h.event_queue.pending(), (0, 0));

    let hop = h.step_consumer();
    assert_eq!(hop.amount, 5);

    let hop = h.step_event_queue();
    assert_eq!((hop.amount, hop.direction), (-5, Direction::Upstream));
    assert_eq!(h.event_queue.pending(), (0, 0));

    let hop = h.step_producer();
    assert_eq!(hop.amount, -5);
    assert_eq!(h.producer.state(), ProducerState::Ready);

    assert_eq!(h.caller_rx.try_recv().map(|v| v.amount), Some(-5));
    assert!(h.all_mailboxes_empty());
}

#[test]
fn zero_never_leaves_the_producer() {
    let mut h = Harness::started();

    h.producer.dispatch(Value::new(0).into()).unwrap();

    assert_eq!(h.producer.state(), ProducerState::Ready);
    assert_eq!(h.caller_rx.try_recv().map(|v| v.amount), Some(0));
    assert!(h.all_mailboxes_empty());
}

#[test]
fn consecutive_round_trips_reuse_ready_state() {
    let mut h = Harness::started();

    for amount in [1, 42, i64::MAX] {
        h.producer.dispatch(Value::new(amount).into()).unwrap();
        h.step_event_queue();
        h.step_consumer();
        h.step_event_queue();
        h.step_producer();

        assert_eq!(h.caller_rx.try_recv().map(|v| v.amount), Some(-amount));
        assert_eq!(h.producer.state(), ProducerState::Ready);
    }
    assert!(h.all_mailboxes_empty());
}

#[test]
fn input_while_awaiting_ack_is_treated_as_ack() {
    let mut h = Harness::started();

    h.producer.dispatch(Value::new(5).into()).unwrap();
    // Caller injects a second value before the first has come back
    h.producer.dispatch(Value::new(7).into()).unwrap();
    assert_eq!(h.caller_rx.try_recv().map(|v| v.amount), Some(7));
    assert_eq!(h.producer.state(), ProducerState::AwaitingAck);

    h.step_event_queue();
    h.step_consumer();
    h.step_event_queue();
    h.step_producer();

    assert_eq!(h.caller_rx.try_recv().map(|v| v.amount), Some(-5));
    assert_eq!(h.producer.state(), ProducerState::Ready);
    assert!(h.all_mailboxes_empty());
}
