//! Per-subscriber queue sets
//!
//! A queue set tracks, for one subscriber, which topics it is subscribed to
//! and the pending messages of each. A topic key present in the set, even
//! with an empty queue, means "subscribed"; absence means "not subscribed".
//!
//! Concurrency notes:
//! - Each queue set owns its lock. The broker's index lock never guards queue
//!   contents, so polls by different subscribers never contend, and a fan-out
//!   publish only contends where two publishers hit the same subscriber.
//! - Every operation is one short critical section: a map lookup plus a
//!   `VecDeque` head or tail mutation.
//! - Queues are unbounded. A subscriber that never polls grows its queues
//!   with every publish until it unsubscribes.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use parking_lot::Mutex;

use super::message::Message;
use super::topic::TopicName;

/// The queue state of a single subscriber.
///
/// Implementations must be internally synchronized; the broker shares them
/// behind `Arc` between its two indices and calls them from many threads.
pub trait SubscriberQueueSet: Debug + Send + Sync {
    /// Ensure a queue exists for `topic`. Never clears an existing queue.
    fn subscribe(&self, topic: &TopicName);

    /// Drop the queue for `topic` and everything pending in it.
    ///
    /// Returns how many topics remain subscribed afterwards. Unknown topics
    /// are a no-op that still reports the current count.
    fn unsubscribe(&self, topic: &TopicName) -> usize;

    /// Append `message` to the tail of the queue for `topic` and return the
    /// queue depth after the append.
    ///
    /// The caller guarantees the subscription exists; the broker only calls
    /// this through its topic index.
    fn publish(&self, topic: &TopicName, message: Message) -> usize;

    /// Remove and return the oldest pending message for `topic`.
    ///
    /// `None` means "subscribed, nothing pending"; `Err(NotSubscribed)`
    /// means there is no queue for `topic` at all.
    fn poll(&self, topic: &TopicName) -> Result<Option<Message>, NotSubscribed>;

    /// Number of messages waiting on `topic`, or `None` if not subscribed.
    fn pending(&self, topic: &TopicName) -> Option<usize>;

    /// Topics this subscriber currently holds a queue for.
    fn topics(&self) -> Vec<TopicName>;
}

/// Marker returned by a queue set asked about a topic it has no queue for.
///
/// The broker turns it into
/// [`PubSubError::SubscriptionNotFound`](crate::utils::PubSubError::SubscriptionNotFound)
/// once it knows the subscriber's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotSubscribed;

/// In-memory queue set: one `VecDeque` per subscribed topic behind a mutex.
#[derive(Debug, Default)]
pub struct QueueSet {
    queues: Mutex<HashMap<TopicName, VecDeque<Message>>>,
}

impl QueueSet {
    /// Creates a queue set with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriberQueueSet for QueueSet {
    fn subscribe(&self, topic: &TopicName) {
        // re-subscribing must not drop what is already queued
        self.queues.lock().entry(topic.clone()).or_default();
    }

    fn unsubscribe(&self, topic: &TopicName) -> usize {
        let mut queues = self.queues.lock();
        queues.remove(topic);
        queues.len()
    }

    fn publish(&self, topic: &TopicName, message: Message) -> usize {
        let mut queues = self.queues.lock();
        match queues.get_mut(topic) {
            Some(queue) => {
                queue.push_back(message);
                queue.len()
            }
            None => {
                // topic index and queue set disagree
                tracing::error!(%topic, "publish reached a queue set without that topic");
                0
            }
        }
    }

    fn poll(&self, topic: &TopicName) -> Result<Option<Message>, NotSubscribed> {
        let mut queues = self.queues.lock();
        let queue = queues.get_mut(topic).ok_or(NotSubscribed)?;
        Ok(queue.pop_front())
    }

    fn pending(&self, topic: &TopicName) -> Option<usize> {
        self.queues.lock().get(topic).map(VecDeque::len)
    }

    fn topics(&self) -> Vec<TopicName> {
        self.queues.lock().keys().cloned().collect()
    }
}
