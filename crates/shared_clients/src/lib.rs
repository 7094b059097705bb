//! Clients for the external systems the preparation pipeline talks to.

pub mod kafka;
pub mod memory;

pub use kafka::{KafkaTopicClient, KafkaTopicClientError, RestProxyTopicClient};
pub use memory::{CreateTopicRequest, InMemoryTopicClient};
