use chrono::{DateTime, Utc};
use common::types::SourceKind;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The Kafka topic backing a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KsqlTopic {
    pub kafka_topic_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
}

impl KsqlTopic {
    pub fn new(kafka_topic_name: impl Into<String>) -> Self {
        Self {
            kafka_topic_name: kafka_topic_name.into(),
            value_format: None,
        }
    }
}

/// A stream or table known to the metastore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub kind: SourceKind,
    pub topic: KsqlTopic,
    /// Column the records are keyed by, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_field: Option<String>,
    /// Statement the source was registered from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_text: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl DataSource {
    pub fn new(name: impl Into<String>, kind: SourceKind, topic: KsqlTopic) -> Self {
        Self {
            name: name.into(),
            kind,
            topic,
            key_field: None,
            statement_text: None,
            registered_at: Utc::now(),
        }
    }

    pub fn kafka_topic_name(&self) -> &str {
        &self.topic.kafka_topic_name
    }
}

impl Display for DataSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (topic: {})",
            self.kind, self.name, self.topic.kafka_topic_name
        )
    }
}
