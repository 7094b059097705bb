use std::sync::Arc;

use common::config::engine::{SINK_PARTITIONS_CONFIG, SINK_REPLICAS_CONFIG};
use common::config::{EngineConfig, PropertySource, SessionOverrides};
use common::types::{topic_name_violation, TopicDescription};
use once_cell::unsync::OnceCell;
use shared_clients::KafkaTopicClientError;
use sql_ast::ast::{
    Literal, Properties, KAFKA_TOPIC_NAME_PROPERTY, PARTITIONS_PROPERTY, REPLICAS_PROPERTY,
};

use crate::error::TopicInjectionError;

/// Lazily describes the topic a sink inherits its layout from.
pub type SourceDescriptionSupplier<'a> =
    Box<dyn Fn() -> Result<TopicDescription, KafkaTopicClientError> + 'a>;

/// Resolved identity of a sink topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProperties {
    pub name: String,
    pub partitions: u32,
    pub replicas: u16,
}

impl TopicProperties {
    pub fn new(name: impl Into<String>, partitions: u32, replicas: u16) -> Self {
        Self {
            name: name.into(),
            partitions,
            replicas,
        }
    }
}

/// Collects the inputs of topic resolution, then resolves them once.
pub trait TopicPropertiesBuilder<'a>: Sized {
    /// Name to use when the `WITH` clause does not set one.
    fn with_name(self, name: String) -> Self;
    fn with_with_clause(self, properties: Properties) -> Self;
    fn with_overrides(self, overrides: SessionOverrides) -> Self;
    fn with_config(self, config: Arc<EngineConfig>) -> Self;
    /// Only invoked when the partition or replica count is not pinned by
    /// the clause, the overrides or the config.
    fn with_source(self, source: SourceDescriptionSupplier<'a>) -> Self;
    fn build(self) -> Result<TopicProperties, TopicInjectionError>;
}

/// Default resolver.
///
/// The topic name comes from `KAFKA_TOPIC` in the `WITH` clause, else the
/// name hint. Partition and replica counts are looked up in the `WITH`
/// clause, then the session overrides, then the engine config, and finally
/// copied from the source topic.
#[derive(Default)]
pub struct Builder<'a> {
    name: Option<String>,
    with_clause: Properties,
    overrides: SessionOverrides,
    config: Arc<EngineConfig>,
    source: Option<SourceDescriptionSupplier<'a>>,
}

impl Builder<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> TopicPropertiesBuilder<'a> for Builder<'a> {
    fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    fn with_with_clause(mut self, properties: Properties) -> Self {
        self.with_clause = properties;
        self
    }

    fn with_overrides(mut self, overrides: SessionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    fn with_config(mut self, config: Arc<EngineConfig>) -> Self {
        self.config = config;
        self
    }

    fn with_source(mut self, source: SourceDescriptionSupplier<'a>) -> Self {
        self.source = Some(source);
        self
    }

    fn build(self) -> Result<TopicProperties, TopicInjectionError> {
        let name = self.resolve_name()?;

        let description: OnceCell<TopicDescription> = OnceCell::new();
        let describe = || {
            description.get_or_try_init(|| -> Result<TopicDescription, TopicInjectionError> {
                let supplier = self.source.as_ref().ok_or_else(|| {
                    TopicInjectionError::resolution(format!(
                        "no source topic to inherit the layout of '{name}' from"
                    ))
                })?;
                supplier().map_err(TopicInjectionError::source_description)
            })
        };

        let partitions: u32 = match self.pinned_count(PARTITIONS_PROPERTY, SINK_PARTITIONS_CONFIG)? {
            Some((value, origin)) => positive(value, PARTITIONS_PROPERTY, origin)?,
            None => {
                let count = describe()?.partition_count();
                positive(i64::from(count), PARTITIONS_PROPERTY, "source topic")?
            }
        };
        let replicas: u16 = match self.pinned_count(REPLICAS_PROPERTY, SINK_REPLICAS_CONFIG)? {
            Some((value, origin)) => positive(value, REPLICAS_PROPERTY, origin)?,
            None => {
                let count = describe()?.replication_factor();
                positive(i64::from(count), REPLICAS_PROPERTY, "source topic")?
            }
        };

        Ok(TopicProperties {
            name,
            partitions,
            replicas,
        })
    }
}

impl Builder<'_> {
    fn resolve_name(&self) -> Result<String, TopicInjectionError> {
        let name = match self.with_clause.get(KAFKA_TOPIC_NAME_PROPERTY) {
            Some(Literal::String(name)) => name.clone(),
            Some(other) => {
                return Err(TopicInjectionError::resolution(format!(
                    "{KAFKA_TOPIC_NAME_PROPERTY} must be a string literal, found {other}"
                )))
            }
            None => self.name.clone().ok_or_else(|| {
                TopicInjectionError::resolution("no topic name was supplied")
            })?,
        };
        validate_topic_name(&name)?;
        Ok(name)
    }

    /// A count fixed by the clause, the overrides or the config, with the
    /// place it was found.
    fn pinned_count(
        &self,
        clause_key: &str,
        config_key: &str,
    ) -> Result<Option<(i64, &'static str)>, TopicInjectionError> {
        match self.with_clause.get(clause_key) {
            Some(Literal::Integer(n)) => return Ok(Some((*n, "WITH clause"))),
            Some(other) => {
                return Err(TopicInjectionError::resolution(format!(
                    "{clause_key} must be an integer literal, found {other}"
                )))
            }
            None => {}
        }
        if let Some(n) = self.overrides.int(config_key)? {
            return Ok(Some((n, self.overrides.origin())));
        }
        if let Some(n) = self.config.int(config_key)? {
            return Ok(Some((n, self.config.origin())));
        }
        Ok(None)
    }
}

fn positive<T: TryFrom<i64>>(value: i64, what: &str, origin: &str) -> Result<T, TopicInjectionError> {
    if value <= 0 {
        return Err(TopicInjectionError::resolution(format!(
            "{what} must be positive but {origin} gives {value}"
        )));
    }
    T::try_from(value).map_err(|_| {
        TopicInjectionError::resolution(format!("{what} of {value} from {origin} is out of range"))
    })
}

/// Checks `name` is a legal Kafka topic name.
pub fn validate_topic_name(name: &str) -> Result<(), TopicInjectionError> {
    match topic_name_violation(name) {
        Some(reason) => Err(TopicInjectionError::resolution(reason)),
        None => Ok(()),
    }
}
