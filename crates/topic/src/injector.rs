use std::sync::Arc;

use catalog::Getter;
use shared_clients::KafkaTopicClient;
use sql_ast::ast::Statement;
use sql_ast::ConfiguredStatement;

use crate::cleanup::cleanup_policy_overrides;
use crate::error::TopicInjectionError;
use crate::naming::derive_topic_name;
use crate::properties::{Builder, TopicPropertiesBuilder};
use crate::provision::TopicProvisioner;
use crate::rewrite::rewrite;
use crate::source::anchor_topic;

/// A step of the statement preparation pipeline.
pub trait Injector {
    fn inject(
        &self,
        statement: ConfiguredStatement,
    ) -> Result<ConfiguredStatement, TopicInjectionError>;
}

/// Pins the sink topic of create-as-select statements and creates it.
pub struct TopicCreateInjector<C, M> {
    provisioner: TopicProvisioner<C>,
    metastore: M,
}

impl<C, M> TopicCreateInjector<C, M>
where
    C: KafkaTopicClient,
    M: Getter,
{
    pub fn new(topic_client: C, metastore: M) -> Self {
        Self {
            provisioner: TopicProvisioner::new(topic_client),
            metastore,
        }
    }

    /// Like [`Injector::inject`], resolving the topic through `builder`.
    pub fn inject_with<'a, B>(
        &'a self,
        statement: ConfiguredStatement,
        builder: B,
    ) -> Result<ConfiguredStatement, TopicInjectionError>
    where
        B: TopicPropertiesBuilder<'a>,
    {
        let shared = Arc::clone(statement.shared_statement());
        let Statement::CreateAsSelect(cas) = shared.as_ref() else {
            log::debug!("no sink topic to create for: {}", statement.statement_text());
            return Ok(statement);
        };

        let source_topic = anchor_topic(&self.metastore, &cas.query)?;
        let name = derive_topic_name(&cas.name, statement.overrides(), statement.config())?;
        let client = self.provisioner.client();

        let identity = builder
            .with_name(name)
            .with_with_clause(cas.properties.clone())
            .with_overrides(statement.overrides().clone())
            .with_config(Arc::clone(statement.config()))
            .with_source(Box::new(move || client.describe_topic(&source_topic)))
            .build()?;
        log::info!(
            "Resolved sink topic of {} to {} ({} partitions, {} replicas)",
            cas.name,
            identity.name,
            identity.partitions,
            identity.replicas
        );

        let configs = cleanup_policy_overrides(cas.kind, cas.is_windowed());
        let rewritten = rewrite(&statement, cas, &identity);
        self.provisioner.ensure_topic(&identity, &configs)?;
        Ok(rewritten)
    }
}

impl<C, M> Injector for TopicCreateInjector<C, M>
where
    C: KafkaTopicClient,
    M: Getter,
{
    fn inject(
        &self,
        statement: ConfiguredStatement,
    ) -> Result<ConfiguredStatement, TopicInjectionError> {
        self.inject_with(statement, Builder::new())
    }
}
