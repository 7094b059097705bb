use std::sync::Arc;
use std::time::Duration;

use common::error::diagnostics::DiagnosticMessage;
use common::types::{TopicConfigOverrides, TopicDescription};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// REST Proxy error code for a topic that already exists.
const TOPIC_ALREADY_EXISTS_ERROR_CODE: i64 = 40002;
/// REST Proxy error code for an unknown topic.
const TOPIC_NOT_FOUND_ERROR_CODE: i64 = 40403;

#[derive(Debug, Error)]
pub enum KafkaTopicClientError {
    #[error("topic not found: {context}")]
    NotFound { context: DiagnosticMessage },
    #[error("topic already exists: {context}")]
    TopicExists { context: DiagnosticMessage },
    #[error("connectivity error: {context}")]
    FailedToConnect { context: DiagnosticMessage },
    #[error("request rejected: {context}")]
    Rejected { context: DiagnosticMessage },
    #[error("unexpected response: {context}")]
    UnexpectedError { context: DiagnosticMessage },
}

impl KafkaTopicClientError {
    #[track_caller]
    pub fn not_found(topic: &str) -> Self {
        Self::NotFound {
            context: DiagnosticMessage::new(format!("Topic '{topic}' does not exist")),
        }
    }

    #[track_caller]
    pub fn topic_exists(message: impl Into<String>) -> Self {
        Self::TopicExists {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn failed_to_connect(message: impl Into<String>) -> Self {
        Self::FailedToConnect {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedError {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

impl From<reqwest::Error> for KafkaTopicClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            KafkaTopicClientError::failed_to_connect(err.to_string())
        } else if let Some(status) = err.status() {
            match status {
                StatusCode::NOT_FOUND => KafkaTopicClientError::unexpected(format!(
                    "resource not found: {err}"
                )),
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    KafkaTopicClientError::rejected(err.to_string())
                }
                _ => KafkaTopicClientError::unexpected(format!(
                    "Unexpected error due to {err} - status code {status}"
                )),
            }
        } else {
            KafkaTopicClientError::unexpected(format!(
                "Unexpected error trying to send topic admin request: {err}"
            ))
        }
    }
}

/// Topic administration used while preparing statements.
pub trait KafkaTopicClient: Send + Sync {
    fn describe_topic(&self, name: &str) -> Result<TopicDescription, KafkaTopicClientError>;

    /// Creates `name` with the given layout. Creating a topic that already
    /// exists with the same partition and replica counts succeeds; an
    /// existing topic with a different layout is a
    /// [`KafkaTopicClientError::TopicExists`] error.
    fn create_topic(
        &self,
        name: &str,
        partitions: u32,
        replicas: u16,
        configs: &TopicConfigOverrides,
    ) -> Result<(), KafkaTopicClientError>;

    fn is_topic_exists(&self, name: &str) -> Result<bool, KafkaTopicClientError> {
        match self.describe_topic(name) {
            Ok(_) => Ok(true),
            Err(KafkaTopicClientError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<T: KafkaTopicClient + ?Sized> KafkaTopicClient for Arc<T> {
    fn describe_topic(&self, name: &str) -> Result<TopicDescription, KafkaTopicClientError> {
        (**self).describe_topic(name)
    }

    fn create_topic(
        &self,
        name: &str,
        partitions: u32,
        replicas: u16,
        configs: &TopicConfigOverrides,
    ) -> Result<(), KafkaTopicClientError> {
        (**self).create_topic(name, partitions, replicas, configs)
    }

    fn is_topic_exists(&self, name: &str) -> Result<bool, KafkaTopicClientError> {
        (**self).is_topic_exists(name)
    }
}

/// Checks that an existing topic has the layout a create request asked for.
pub fn ensure_topic_layout(
    existing: &TopicDescription,
    partitions: u32,
    replicas: u16,
) -> Result<(), KafkaTopicClientError> {
    if existing.partition_count() == partitions && existing.replication_factor() == replicas {
        return Ok(());
    }
    Err(KafkaTopicClientError::topic_exists(format!(
        "Topic '{}' exists with {} partitions and {} replicas, requested {} partitions and {} replicas",
        existing.name,
        existing.partition_count(),
        existing.replication_factor(),
        partitions,
        replicas
    )))
}

#[derive(Debug, Deserialize)]
struct TopicData {
    topic_name: String,
    partitions_count: u32,
    replication_factor: u16,
}

#[derive(Debug, Serialize)]
struct TopicConfigEntry<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateTopicBody<'a> {
    topic_name: &'a str,
    partitions_count: u32,
    replication_factor: u16,
    configs: Vec<TopicConfigEntry<'a>>,
}

#[derive(Debug, Deserialize)]
struct RestProxyErrorBody {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

/// Topic client backed by the Confluent REST Proxy v3 API.
#[derive(Debug, Clone)]
pub struct RestProxyTopicClient {
    base_url: Url,
    cluster_id: String,
    http: Client,
}

impl RestProxyTopicClient {
    pub fn new(base_url: &str, cluster_id: &str) -> Result<Self, KafkaTopicClientError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            KafkaTopicClientError::failed_to_connect(format!(
                "invalid REST proxy url '{base_url}': {e}"
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(KafkaTopicClientError::failed_to_connect(format!(
                "REST proxy url '{base_url}' cannot carry a path"
            )));
        }
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url,
            cluster_id: cluster_id.to_string(),
            http,
        })
    }

    /// `/v3/clusters/{cluster}/topics[/{topic}]` under the base url. Each
    /// segment is percent-encoded, so a name can never change the route.
    fn topics_url(&self, topic: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v3", "clusters", self.cluster_id.as_str(), "topics"]);
            if let Some(topic) = topic {
                segments.push(topic);
            }
        }
        url
    }

    fn error_body(resp: reqwest::blocking::Response) -> RestProxyErrorBody {
        let status = resp.status();
        resp.json().unwrap_or_else(|_| RestProxyErrorBody {
            error_code: i64::from(status.as_u16()),
            message: format!("could not parse error body (status {status})"),
        })
    }
}

impl KafkaTopicClient for RestProxyTopicClient {
    fn describe_topic(&self, name: &str) -> Result<TopicDescription, KafkaTopicClientError> {
        let resp = self.http.get(self.topics_url(Some(name))).send()?;
        let status = resp.status();

        if status.is_success() {
            let topic: TopicData = resp.json()?;
            if topic.topic_name != name {
                return Err(KafkaTopicClientError::unexpected(format!(
                    "Asked to describe topic '{name}' but the REST proxy described '{}'",
                    topic.topic_name
                )));
            }
            return Ok(TopicDescription::new(
                topic.topic_name,
                topic.partitions_count,
                topic.replication_factor,
            ));
        }

        let body = Self::error_body(resp);
        if status == StatusCode::NOT_FOUND || body.error_code == TOPIC_NOT_FOUND_ERROR_CODE {
            return Err(KafkaTopicClientError::not_found(name));
        }
        Err(KafkaTopicClientError::unexpected(format!(
            "Failed to describe topic '{name}': {} - status code {}",
            body.message,
            status.as_u16()
        )))
    }

    fn create_topic(
        &self,
        name: &str,
        partitions: u32,
        replicas: u16,
        configs: &TopicConfigOverrides,
    ) -> Result<(), KafkaTopicClientError> {
        let body = CreateTopicBody {
            topic_name: name,
            partitions_count: partitions,
            replication_factor: replicas,
            configs: configs
                .iter()
                .map(|(name, value)| TopicConfigEntry { name, value })
                .collect(),
        };
        let resp = self.http.post(self.topics_url(None)).json(&body).send()?;
        let status = resp.status();

        if status.is_success() {
            log::debug!("created topic {name} ({partitions} partitions, {replicas} replicas)");
            return Ok(());
        }

        let error = Self::error_body(resp);
        if error.error_code == TOPIC_ALREADY_EXISTS_ERROR_CODE {
            log::debug!("topic {name} already exists, validating its layout");
            let existing = self.describe_topic(name)?;
            return ensure_topic_layout(&existing, partitions, replicas);
        }

        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY => Err(KafkaTopicClientError::rejected(format!(
                "Failed to create topic '{name}': {}",
                error.message
            ))),
            status => Err(KafkaTopicClientError::unexpected(format!(
                "Unexpected error trying to create topic '{name}' due to {} - status code {}",
                error.message,
                status.as_u16()
            ))),
        }
    }
}
