use std::collections::BTreeMap;

use common::types::{TopicConfigOverrides, TopicDescription};
use parking_lot::Mutex;

use crate::kafka::{ensure_topic_layout, KafkaTopicClient, KafkaTopicClientError};

/// A create request as received by [`InMemoryTopicClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTopicRequest {
    pub name: String,
    pub partitions: u32,
    pub replicas: u16,
    pub configs: TopicConfigOverrides,
}

#[derive(Default)]
struct Inner {
    topics: BTreeMap<String, TopicDescription>,
    requests: Vec<CreateTopicRequest>,
    describe_calls: usize,
}

/// Topic client that keeps topics in memory and records every request.
///
/// Used for dry runs and in tests.
#[derive(Default)]
pub struct InMemoryTopicClient {
    inner: Mutex<Inner>,
}

impl InMemoryTopicClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(self, description: TopicDescription) -> Self {
        self.add_topic(description);
        self
    }

    pub fn add_topic(&self, description: TopicDescription) {
        self.inner
            .lock()
            .topics
            .insert(description.name.clone(), description);
    }

    pub fn topic(&self, name: &str) -> Option<TopicDescription> {
        self.inner.lock().topics.get(name).cloned()
    }

    /// Every create request received so far, in arrival order.
    pub fn create_requests(&self) -> Vec<CreateTopicRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn describe_calls(&self) -> usize {
        self.inner.lock().describe_calls
    }
}

impl KafkaTopicClient for InMemoryTopicClient {
    fn describe_topic(&self, name: &str) -> Result<TopicDescription, KafkaTopicClientError> {
        let mut inner = self.inner.lock();
        inner.describe_calls += 1;
        inner
            .topics
            .get(name)
            .cloned()
            .ok_or_else(|| KafkaTopicClientError::not_found(name))
    }

    fn create_topic(
        &self,
        name: &str,
        partitions: u32,
        replicas: u16,
        configs: &TopicConfigOverrides,
    ) -> Result<(), KafkaTopicClientError> {
        let mut inner = self.inner.lock();
        inner.requests.push(CreateTopicRequest {
            name: name.to_string(),
            partitions,
            replicas,
            configs: configs.clone(),
        });
        if let Some(existing) = inner.topics.get(name) {
            return ensure_topic_layout(existing, partitions, replicas);
        }
        inner.topics.insert(
            name.to_string(),
            TopicDescription::uniform(name, partitions, replicas),
        );
        Ok(())
    }
}
