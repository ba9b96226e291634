//! Broker engine
//!
//! This module contains the in-memory broker responsible for:
//! - tracking which subscribers hold which topic subscriptions
//! - fanning published messages out into every subscriber's queue
//! - handing queued messages back to subscribers that poll for them
//!
//! Concurrency and usage notes:
//! - The public API is synchronous and takes `&self`; share the broker
//!   between threads with `Arc<Broker>`. No operation waits on I/O.
//! - One reader/writer lock guards the two indices (subscriber → queue set,
//!   topic → subscribers). `subscribe`, `unsubscribe` and `remove_subscriber`
//!   take it for writing; `publish` and the lookup half of `poll` take it for
//!   reading, so publishes and polls run concurrently with each other.
//! - Queue contents live behind each queue set's own lock. `publish` takes
//!   those while still holding the index read lock; `poll` releases the index
//!   lock before touching the queue.
//! - Messages published to a topic nobody subscribes to are dropped. They
//!   are never buffered for subscribers that arrive later.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use super::message::Message;
use super::queue_set::{NotSubscribed, QueueSet, SubscriberQueueSet};
use super::topic::{SubscriberId, Topic, TopicName};
use crate::config::BrokerSettings;
use crate::utils::PubSubError;

/// Point-in-time sizes of the broker indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrokerStats {
    /// Subscribers holding at least one subscription.
    pub subscribers: usize,
    /// Topics with at least one subscriber.
    pub topics: usize,
}

#[derive(Debug)]
struct Index<Q> {
    clients: HashMap<SubscriberId, Arc<Q>>,
    topics: HashMap<TopicName, Topic<Q>>,
}

impl<Q> Index<Q> {
    fn new() -> Self {
        Self {
            clients: HashMap::new(),
            topics: HashMap::new(),
        }
    }

    /// Removes `subscriber` from the topic index entry for `topic`, dropping
    /// the entry once nobody is left on it.
    fn detach(&mut self, topic: &TopicName, subscriber: &SubscriberId) {
        if let Some(entry) = self.topics.get_mut(topic) {
            entry.unsubscribe(subscriber);
            if entry.is_empty() {
                trace!(topic = %entry.name, "last subscriber left, dropping topic");
                self.topics.remove(topic);
            }
        }
    }
}

/// In-process publish/subscribe broker with pull-based delivery.
///
/// Every (topic, subscriber) pair owns a FIFO queue from the moment
/// [`subscribe`](Broker::subscribe) returns until
/// [`unsubscribe`](Broker::unsubscribe) is called. Queues are unbounded:
/// a subscriber that stops polling keeps accumulating messages, which is a
/// memory exhaustion risk the embedding application has to manage. The only
/// mitigation here is a `warn!` event each time a queue grows past a multiple
/// of [`BrokerSettings::queue_warn_threshold`].
///
/// The queue set type is pluggable through [`SubscriberQueueSet`]; the
/// default is the in-memory [`QueueSet`].
#[derive(Debug)]
pub struct Broker<Q = QueueSet> {
    index: RwLock<Index<Q>>,
    queue_warn_threshold: usize,
}

impl Broker {
    /// Creates an empty broker with default settings.
    pub fn new() -> Self {
        Self::from_settings(&BrokerSettings::default())
    }

    /// Creates an empty broker tuned by `settings`.
    ///
    /// Shorthand for [`Broker::from_settings`] with the default [`QueueSet`],
    /// so callers need no type annotation.
    pub fn with_settings(settings: &BrokerSettings) -> Self {
        Self::from_settings(settings)
    }
}

impl<Q: SubscriberQueueSet + Default> Default for Broker<Q> {
    fn default() -> Self {
        Self::from_settings(&BrokerSettings::default())
    }
}

impl<Q: SubscriberQueueSet + Default> Broker<Q> {
    /// Creates an empty broker using `Q` for per-subscriber queues.
    pub fn from_settings(settings: &BrokerSettings) -> Self {
        Self {
            index: RwLock::new(Index::new()),
            queue_warn_threshold: settings.queue_warn_threshold,
        }
    }

    /// Subscribes `subscriber` to `topic`.
    ///
    /// Only messages published after this call returns are delivered.
    /// Subscribing again to a topic already subscribed keeps its queue.
    pub fn subscribe(&self, topic: &TopicName, subscriber: &SubscriberId) {
        let mut guard = self.index.write();
        let index = &mut *guard;

        let queues = index
            .clients
            .entry(subscriber.clone())
            .or_insert_with(|| Arc::new(Q::default()));
        queues.subscribe(topic);

        index
            .topics
            .entry(topic.clone())
            .or_insert_with(|| Topic::new(topic.clone()))
            .subscribe(subscriber.clone(), Arc::clone(queues));

        debug!(%topic, %subscriber, "subscribed");
    }

    /// Removes the subscription of `subscriber` to `topic`, discarding any
    /// messages still queued for it.
    ///
    /// A subscriber left without subscriptions is forgotten entirely. Unknown
    /// pairs are a no-op.
    pub fn unsubscribe(&self, topic: &TopicName, subscriber: &SubscriberId) {
        let mut guard = self.index.write();
        let index = &mut *guard;

        let Some(queues) = index.clients.get(subscriber) else {
            return;
        };
        let remaining = queues.unsubscribe(topic);
        if remaining == 0 {
            index.clients.remove(subscriber);
        }
        index.detach(topic, subscriber);

        debug!(%topic, %subscriber, remaining, "unsubscribed");
    }

    /// Drops every subscription `subscriber` holds, with all queued messages.
    pub fn remove_subscriber(&self, subscriber: &SubscriberId) {
        let mut guard = self.index.write();
        let index = &mut *guard;

        let Some(queues) = index.clients.remove(subscriber) else {
            return;
        };
        let topics = queues.topics();
        for topic in &topics {
            queues.unsubscribe(topic);
            index.detach(topic, subscriber);
        }

        debug!(%subscriber, topics = topics.len(), "removed subscriber");
    }

    /// Delivers `message` to every current subscriber of `topic`.
    ///
    /// Without subscribers the message is dropped.
    pub fn publish(&self, topic: &TopicName, message: impl Into<Message>) {
        let message = message.into();
        let index = self.index.read();

        let Some(entry) = index.topics.get(topic) else {
            trace!(%topic, "no subscribers, message dropped");
            return;
        };

        for (subscriber, queues) in &entry.subscribers {
            let depth = queues.publish(topic, message.clone());
            self.check_depth(topic, subscriber, depth);
        }

        trace!(%topic, delivered = entry.len(), bytes = message.len(), "published");
    }

    /// Removes and returns the oldest message queued for `subscriber` on
    /// `topic`.
    ///
    /// `Ok(None)` means the subscription exists but nothing is pending.
    /// Returns [`PubSubError::SubscriptionNotFound`] when `subscriber` is not
    /// subscribed to `topic`.
    pub fn poll(
        &self,
        topic: &TopicName,
        subscriber: &SubscriberId,
    ) -> Result<Option<Message>, PubSubError> {
        let queues = self
            .queue_set(subscriber)
            .ok_or_else(|| PubSubError::not_found(topic, subscriber))?;

        let message = queues
            .poll(topic)
            .map_err(|NotSubscribed| PubSubError::not_found(topic, subscriber))?;

        trace!(%topic, %subscriber, hit = message.is_some(), "polled");
        Ok(message)
    }

    /// Number of messages waiting for `subscriber` on `topic`.
    pub fn pending(
        &self,
        topic: &TopicName,
        subscriber: &SubscriberId,
    ) -> Result<usize, PubSubError> {
        self.queue_set(subscriber)
            .and_then(|queues| queues.pending(topic))
            .ok_or_else(|| PubSubError::not_found(topic, subscriber))
    }

    /// Returns `true` while `subscriber` holds a subscription to `topic`.
    pub fn is_subscribed(&self, topic: &TopicName, subscriber: &SubscriberId) -> bool {
        self.index
            .read()
            .topics
            .get(topic)
            .is_some_and(|entry| entry.subscribers.contains_key(subscriber))
    }

    /// Current number of subscribers and topics in the indices.
    pub fn stats(&self) -> BrokerStats {
        let index = self.index.read();
        BrokerStats {
            subscribers: index.clients.len(),
            topics: index.topics.len(),
        }
    }

    /// Looks up the queue set of `subscriber`, releasing the index lock
    /// before returning.
    fn queue_set(&self, subscriber: &SubscriberId) -> Option<Arc<Q>> {
        self.index.read().clients.get(subscriber).cloned()
    }

    fn check_depth(&self, topic: &TopicName, subscriber: &SubscriberId, depth: usize) {
        let threshold = self.queue_warn_threshold;
        if threshold > 0 && depth > 0 && depth % threshold == 0 {
            warn!(%topic, %subscriber, depth, "subscriber queue keeps growing, is it polling?");
        }
    }
}
