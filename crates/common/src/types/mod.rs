pub mod kafka;
pub mod sources;

pub use kafka::{topic_name_violation, TopicConfigOverrides, TopicDescription, TopicPartitionInfo};
pub use sources::SourceKind;
