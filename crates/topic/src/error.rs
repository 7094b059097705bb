use catalog::error::CatalogError;
use common::error::diagnostics::DiagnosticMessage;
use common::error::ConfigError;
use shared_clients::KafkaTopicClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopicInjectionError {
    #[error("could not resolve source: {context}")]
    UnresolvedSource {
        context: DiagnosticMessage,
        #[source]
        source: CatalogError,
    },
    #[error("could not resolve topic properties: {context}")]
    Resolution { context: DiagnosticMessage },
    #[error("could not describe source topic: {context}")]
    SourceDescription {
        context: DiagnosticMessage,
        #[source]
        source: KafkaTopicClientError,
    },
    #[error("could not create topic: {context}")]
    Provision {
        context: DiagnosticMessage,
        #[source]
        source: KafkaTopicClientError,
    },
    #[error("invalid configuration: {context}")]
    Config {
        context: DiagnosticMessage,
        #[source]
        source: ConfigError,
    },
}

impl TopicInjectionError {
    #[track_caller]
    pub fn unresolved_source(name: &str, source: CatalogError) -> Self {
        Self::UnresolvedSource {
            context: DiagnosticMessage::new(format!("'{name}' is not a registered source")),
            source,
        }
    }

    #[track_caller]
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn source_description(source: KafkaTopicClientError) -> Self {
        Self::SourceDescription {
            context: DiagnosticMessage::new(source.to_string()),
            source,
        }
    }

    #[track_caller]
    pub fn provision(topic: &str, source: KafkaTopicClientError) -> Self {
        Self::Provision {
            context: DiagnosticMessage::new(format!("failed to create topic '{topic}'")),
            source,
        }
    }

    #[track_caller]
    pub fn config(source: ConfigError) -> Self {
        Self::Config {
            context: DiagnosticMessage::new(source.to_string()),
            source,
        }
    }
}

impl From<ConfigError> for TopicInjectionError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        TopicInjectionError::config(err)
    }
}
