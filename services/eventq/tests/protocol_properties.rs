//! Property tests for the relay state machines

use actors::{inbox, Inbox, Message};
use eventq::{
    Consumer, ConsumerMessage, ConsumerStart, Direction, EventQueue, EventQueueMessage,
    EventQueueStart, Producer, ProducerMessage, ProducerStart, ProducerState, Value,
};
use proptest::prelude::*;

fn values_of<M>(rx: &mut Inbox<M>, extract: impl Fn(M) -> Option<Value>) -> Vec<Value>
where
    M: Message,
{
    rx.drain().into_iter().filter_map(extract).collect()
}

fn to_value_from_event_queue(msg: EventQueueMessage) -> Option<Value> {
    match msg {
        EventQueueMessage::Value(value) => Some(value),
        EventQueueMessage::Start(_) => None,
    }
}

fn to_value_from_consumer(msg: ConsumerMessage) -> Option<Value> {
    match msg {
        ConsumerMessage::Value(value) => Some(value),
        ConsumerMessage::Start(_) => None,
    }
}

fn to_value_from_producer(msg: ProducerMessage) -> Option<Value> {
    match msg {
        ProducerMessage::Value(value) => Some(value),
        ProducerMessage::Start(_) => None,
    }
}

struct ProducerRig {
    producer: Producer,
    caller_rx: Inbox<Value>,
    event_queue_rx: Inbox<EventQueueMessage>,
    _consumer_rx: Inbox<ConsumerMessage>,
}

fn producer_rig() -> ProducerRig {
    let (caller, caller_rx) = inbox::<Value>("caller");
    let (consumer, consumer_rx) = inbox::<ConsumerMessage>("consumer");
    let (event_queue, event_queue_rx) = inbox::<EventQueueMessage>("event-queue");

    let mut producer = Producer::new();
    producer
        .dispatch(
            ProducerStart {
                caller,
                consumer,
                event_queue,
            }
            .into(),
        )
        .unwrap();

    ProducerRig {
        producer,
        caller_rx,
        event_queue_rx,
        _consumer_rx: consumer_rx,
    }
}

fn event_queue_rig() -> (EventQueue, Inbox<ProducerMessage>, Inbox<ConsumerMessage>) {
    let (caller, _caller_rx) = inbox::<Value>("caller");
    let (producer, producer_rx) = inbox::<ProducerMessage>("producer");
    let (consumer, consumer_rx) = inbox::<ConsumerMessage>("consumer");

    let mut queue = EventQueue::new();
    queue
        .dispatch(
            EventQueueStart {
                caller,
                producer,
                consumer,
            }
            .into(),
        )
        .unwrap();
    (queue, producer_rx, consumer_rx)
}

fn consumer_rig() -> (Consumer, Inbox<EventQueueMessage>) {
    let (caller, _caller_rx) = inbox::<Value>("caller");
    let (producer, _producer_rx) = inbox::<ProducerMessage>("producer");
    let (event_queue, event_queue_rx) = inbox::<EventQueueMessage>("event-queue");

    let mut consumer = Consumer::new();
    consumer
        .dispatch(
            ConsumerStart {
                caller,
                producer,
                event_queue,
            }
            .into(),
        )
        .unwrap();
    (consumer, event_queue_rx)
}

proptest! {
    #[test]
    fn ready_producer_reflects_non_positive_input(v in i64::MIN..=0) {
        let mut rig = producer_rig();

        rig.producer.dispatch(Value::new(v).into()).unwrap();

        prop_assert_eq!(rig.producer.state(), ProducerState::Ready);
        prop_assert_eq!(rig.caller_rx.try_recv().map(|value| value.amount), Some(v));
        prop_assert!(rig.event_queue_rx.try_recv().is_none());
    }

    #[test]
    fn awaiting_producer_reflects_non_negative_ack(first in 1i64..=i64::MAX, v in 0i64..=i64::MAX) {
        let mut rig = producer_rig();
        rig.producer.dispatch(Value::new(first).into()).unwrap();
        rig.event_queue_rx.drain();

        rig.producer.dispatch(Value::new(v).into()).unwrap();

        prop_assert_eq!(rig.producer.state(), ProducerState::AwaitingAck);
        prop_assert_eq!(rig.caller_rx.try_recv().map(|value| value.amount), Some(v));
        prop_assert!(rig.event_queue_rx.try_recv().is_none());
    }

    #[test]
    fn event_queue_passes_values_through_in_order(amounts in prop::collection::vec(any::<i64>(), 0..64)) {
        let (mut queue, mut producer_rx, mut consumer_rx) = event_queue_rig();

        for &amount in &amounts {
            queue.dispatch(Value::new(amount).into()).unwrap();
            prop_assert_eq!(queue.pending(), (0, 0));
        }

        let downstream: Vec<i64> = amounts.iter().copied().filter(|a| *a > 0).collect();
        let upstream: Vec<i64> = amounts.iter().copied().filter(|a| *a <= 0).collect();

        let to_consumer = values_of(&mut consumer_rx, to_value_from_consumer);
        let to_producer = values_of(&mut producer_rx, to_value_from_producer);

        prop_assert!(to_consumer.iter().all(|v| v.direction == Direction::Downstream));
        prop_assert!(to_producer.iter().all(|v| v.direction == Direction::Upstream));
        prop_assert_eq!(to_consumer.iter().map(|v| v.amount).collect::<Vec<_>>(), downstream);
        prop_assert_eq!(to_producer.iter().map(|v| v.amount).collect::<Vec<_>>(), upstream);
    }

    #[test]
    fn consumer_negates_every_value(v in any::<i64>()) {
        let (mut consumer, mut event_queue_rx) = consumer_rig();

        consumer.dispatch(Value::downstream(v).into()).unwrap();

        let sent = values_of(&mut event_queue_rx, to_value_from_event_queue);
        prop_assert_eq!(sent.len(), 1);
        prop_assert_eq!(sent[0].amount, v.wrapping_neg());
        prop_assert_eq!(sent[0].direction, Direction::Upstream);
    }

    #[test]
    fn positive_value_comes_back_negated(v in 1i64..=i64::MAX) {
        let mut rig = producer_rig();
        let (mut queue, mut producer_rx, mut consumer_rx) = event_queue_rig();
        let (mut consumer, mut consumer_out) = consumer_rig();

        rig.producer.dispatch(Value::new(v).into()).unwrap();
        for msg in rig.event_queue_rx.drain() {
            queue.dispatch(msg).unwrap();
        }
        for msg in consumer_rx.drain() {
            consumer.dispatch(msg).unwrap();
        }
        for msg in consumer_out.drain() {
            queue.dispatch(msg).unwrap();
        }
        for msg in producer_rx.drain() {
            rig.producer.dispatch(msg).unwrap();
        }

        prop_assert_eq!(rig.producer.state(), ProducerState::Ready);
        prop_assert_eq!(rig.caller_rx.try_recv().map(|value| value.amount), Some(-v));
    }
}
