pub mod engine;
pub mod message;
pub mod queue_set;
pub mod topic;

pub use engine::{Broker, BrokerStats};
pub use message::Message;
pub use queue_set::{NotSubscribed, QueueSet, SubscriberQueueSet};
pub use topic::{SubscriberId, TopicName};
