//! Identifiers and the topic index entry.
//!
//! `TopicName` and `SubscriberId` are distinct nominal types over the same
//! string representation so a topic can never be passed where a subscriber is
//! expected. Both wrap an `Arc<str>`: the broker clones identifiers into two
//! indices and into every error it returns, and those clones stay cheap.
//!
//! A `Topic` holds the set of subscribers for one topic name, each mapped to
//! the queue set publishes are delivered into. Callers must synchronize
//! access to `Topic` (the broker does so with its index lock).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Copies `value` into a new identifier.
            pub fn new(value: impl AsRef<str>) -> Self {
                Self(Arc::from(value.as_ref()))
            }

            /// Borrows the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Arc::from(value))
            }
        }

        impl From<&String> for $name {
            fn from(value: &String) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Name of a channel messages are published to. Compared byte for byte;
    /// never validated.
    TopicName
);

string_id!(
    /// Name of a consumer that subscribes to topics and polls them.
    SubscriberId
);

impl SubscriberId {
    /// Creates a fresh random identifier for callers without a natural name.
    pub fn generate() -> Self {
        Self::from(Uuid::new_v4().to_string())
    }
}

/// Topic index entry: every subscriber currently subscribed to `name`.
#[derive(Debug)]
pub struct Topic<Q> {
    pub name: TopicName,
    pub subscribers: HashMap<SubscriberId, Arc<Q>>,
}

impl<Q> Topic<Q> {
    /// Create a new topic with no subscribers.
    pub fn new(name: TopicName) -> Self {
        Self {
            name,
            subscribers: HashMap::new(),
        }
    }

    /// Add a subscriber to the topic. Duplicate adds keep the existing entry.
    pub fn subscribe(&mut self, id: SubscriberId, queues: Arc<Q>) {
        self.subscribers.entry(id).or_insert(queues);
    }

    /// Remove a subscriber from the topic. Returns `true` if it was present.
    pub fn unsubscribe(&mut self, id: &SubscriberId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}
