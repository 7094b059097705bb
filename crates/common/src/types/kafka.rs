use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Topic level config key controlling segment retention.
pub const CLEANUP_POLICY_CONFIG: &str = "cleanup.policy";
/// Keep only the latest record per key.
pub const CLEANUP_POLICY_COMPACT: &str = "compact";
/// Longest topic name the broker accepts.
pub const MAX_TOPIC_NAME_LENGTH: usize = 249;

/// Topic config entries sent along with a create request, ordered by key.
pub type TopicConfigOverrides = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPartitionInfo {
    pub partition: u32,
    /// Broker ids hosting a replica of this partition, leader first.
    pub replicas: Vec<i32>,
}

/// Broker side view of an existing topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescription {
    pub name: String,
    partition_count: u32,
    replication_factor: u16,
    /// Replica placement per partition. Empty when the broker was only asked
    /// for the topic's counts.
    #[serde(default)]
    pub partitions: Vec<TopicPartitionInfo>,
}

impl TopicDescription {
    /// Describes a topic by its counts alone.
    pub fn new(name: impl Into<String>, partition_count: u32, replication_factor: u16) -> Self {
        Self {
            name: name.into(),
            partition_count,
            replication_factor,
            partitions: Vec::new(),
        }
    }

    /// Describes a topic whose partitions all carry `replicas` replicas,
    /// spread round-robin over brokers `0..replicas`.
    pub fn uniform(name: impl Into<String>, partitions: u32, replicas: u16) -> Self {
        let brokers = u32::from(replicas.max(1));
        let placement = (0..partitions)
            .map(|partition| TopicPartitionInfo {
                partition,
                replicas: (0..u32::from(replicas))
                    .map(|r| ((r + partition % brokers) % brokers) as i32)
                    .collect(),
            })
            .collect();
        Self {
            partitions: placement,
            ..Self::new(name, partitions, replicas)
        }
    }

    pub fn partition_count(&self) -> u32 {
        self.partition_count
    }

    /// Zero for a topic without partitions.
    pub fn replication_factor(&self) -> u16 {
        if self.partition_count == 0 {
            0
        } else {
            self.replication_factor
        }
    }
}

/// Why `name` is not a legal Kafka topic name, if it is not.
pub fn topic_name_violation(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("topic name must not be blank".to_string());
    }
    if name == "." || name == ".." {
        return Some(format!("topic name cannot be '{name}'"));
    }
    if name.len() > MAX_TOPIC_NAME_LENGTH {
        return Some(format!(
            "topic name '{name}' is longer than {MAX_TOPIC_NAME_LENGTH} characters"
        ));
    }
    name.chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .map(|illegal| format!("topic name '{name}' contains illegal character '{illegal}'"))
}
