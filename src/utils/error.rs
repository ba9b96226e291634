//! The `error` module defines the error types surfaced by the broker.
//!
//! The broker has exactly one failure mode: asking for messages on a
//! subscription that does not exist. Every other outcome (publishing to a
//! topic nobody listens to, polling an empty queue, unsubscribing twice) is a
//! normal, silent result.

use thiserror::Error;

use crate::broker::topic::{SubscriberId, TopicName};

/// Errors returned by [`Broker`](crate::broker::Broker) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubSubError {
    /// The subscriber is unknown, or known but not subscribed to `topic`.
    #[error("pubsub: subscription not found (topic `{topic}`, subscriber `{subscriber}`)")]
    SubscriptionNotFound {
        topic: TopicName,
        subscriber: SubscriberId,
    },
}

impl PubSubError {
    pub(crate) fn not_found(topic: &TopicName, subscriber: &SubscriberId) -> Self {
        PubSubError::SubscriptionNotFound {
            topic: topic.clone(),
            subscriber: subscriber.clone(),
        }
    }

    /// Returns `true` for [`PubSubError::SubscriptionNotFound`].
    pub fn is_subscription_not_found(&self) -> bool {
        matches!(self, PubSubError::SubscriptionNotFound { .. })
    }
}
