//! # pullsub
//!
//! `pullsub` is an in-process publish/subscribe broker with pull-based
//! delivery. Producers publish opaque byte messages to named topics;
//! subscribers register interest in topics and later poll the messages
//! published since they subscribed. There is no network layer and no
//! persistence: the broker's whole state lives in process memory.
//!
//! ## Core Modules
//!
//! - `broker`: the `Broker`, the per-subscriber queue sets, identifiers and
//!   the `Message` type.
//! - `config`: loads `Settings` from an optional file and the environment.
//! - `utils`: the error type and logging setup.
//!
//! ## Locking
//!
//! A broker-wide reader/writer lock protects only the topic and subscriber
//! indices. Each subscriber's queues sit behind that subscriber's own mutex,
//! so publishes and polls scale with the number of subscribers while
//! subscribe and unsubscribe are serialized.
//!
//! ## Unbounded queues
//!
//! There is no back-pressure. A subscriber that stops polling accumulates
//! every message published to its topics until it unsubscribes, and can
//! exhaust memory. `BrokerSettings::queue_warn_threshold` only logs a warning
//! when a queue grows past it.
//!
//! ```
//! use pullsub::{Broker, SubscriberId, TopicName};
//!
//! let broker = Broker::new();
//! let topic = TopicName::from("topic");
//! let subscriber = SubscriberId::from("sub");
//!
//! broker.subscribe(&topic, &subscriber);
//! broker.publish(&topic, br#"{"foo":"bar"}"#);
//! let msg = broker.poll(&topic, &subscriber).unwrap();
//! broker.unsubscribe(&topic, &subscriber);
//!
//! assert_eq!(msg.as_deref(), Some(&br#"{"foo":"bar"}"#[..]));
//! ```

pub mod broker;
pub mod config;
pub mod utils;

pub use broker::{Broker, BrokerStats, Message, SubscriberId, TopicName};
pub use utils::PubSubError;
