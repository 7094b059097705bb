use common::types::TopicConfigOverrides;
use shared_clients::KafkaTopicClient;

use crate::error::TopicInjectionError;
use crate::properties::TopicProperties;

/// Issues the create request for a resolved sink topic.
pub struct TopicProvisioner<C> {
    client: C,
}

impl<C: KafkaTopicClient> TopicProvisioner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Always asks the broker to create the topic. Whether an existing topic
    /// is acceptable is the client's call.
    pub fn ensure_topic(
        &self,
        identity: &TopicProperties,
        configs: &TopicConfigOverrides,
    ) -> Result<(), TopicInjectionError> {
        log::info!(
            "Creating topic {} with {} partitions and {} replicas {:?}",
            identity.name,
            identity.partitions,
            identity.replicas,
            configs
        );
        self.client
            .create_topic(&identity.name, identity.partitions, identity.replicas, configs)
            .map_err(|e| TopicInjectionError::provision(&identity.name, e))
    }
}
