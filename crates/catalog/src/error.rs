use common::diag;
use common::error::diagnostics::DiagnosticMessage;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry already exists: {context}")]
    Duplicate { context: DiagnosticMessage },
    #[error("catalog lookup failed: {context}")]
    NotFound { context: DiagnosticMessage },
    #[error("serde json error: {context}")]
    SerdeJson {
        context: DiagnosticMessage,
        #[source]
        source: serde_json::Error,
    },
    #[error("I/O error: {context}")]
    Io {
        context: DiagnosticMessage,
        #[source]
        source: io::Error,
    },
    #[error("unsupported operation: {context}")]
    Unsupported { context: DiagnosticMessage },
    #[error("missing property: {context}")]
    MissingProperty { context: DiagnosticMessage },
    #[error("invalid topic: {context}")]
    InvalidTopic { context: DiagnosticMessage },
}

impl CatalogError {
    #[track_caller]
    pub fn duplicate(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Duplicate {
            context: diag!("Source '{}' already exists", name),
        }
    }

    #[track_caller]
    pub fn not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::NotFound {
            context: diag!("Source '{}' does not exist", name),
        }
    }

    #[track_caller]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn missing_property(source: &str, property: &str) -> Self {
        Self::MissingProperty {
            context: diag!(
                "'{}' cannot be registered without a {} property",
                source,
                property
            ),
        }
    }

    #[track_caller]
    pub fn invalid_topic(source: &str, reason: &str) -> Self {
        Self::InvalidTopic {
            context: diag!("'{}' cannot be registered: {}", source, reason),
        }
    }

    #[track_caller]
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: DiagnosticMessage::new(message.into()),
            source,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerdeJson {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}

impl From<io::Error> for CatalogError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        CatalogError::Io {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}
