use sql_ast::ast::{
    CreateAsSelect, Literal, Properties, Statement, KAFKA_TOPIC_NAME_PROPERTY,
    PARTITIONS_PROPERTY, REPLICAS_PROPERTY,
};
use sql_ast::ConfiguredStatement;

use crate::properties::TopicProperties;

/// `properties` with the topic name, partition count and replica count set
/// to `identity`. Every other entry is kept as is.
pub fn pin_topic_properties(properties: &Properties, identity: &TopicProperties) -> Properties {
    properties
        .with(KAFKA_TOPIC_NAME_PROPERTY, Literal::string(&identity.name))
        .with(PARTITIONS_PROPERTY, i64::from(identity.partitions))
        .with(REPLICAS_PROPERTY, i64::from(identity.replicas))
}

/// A copy of `configured` whose create-as-select statement has `identity`
/// pinned in its `WITH` clause, along with the regenerated statement text.
pub fn rewrite(
    configured: &ConfiguredStatement,
    cas: &CreateAsSelect,
    identity: &TopicProperties,
) -> ConfiguredStatement {
    let rewritten = Statement::CreateAsSelect(
        cas.with_properties(pin_topic_properties(&cas.properties, identity)),
    );
    let statement_text = rewritten.to_string();
    configured.with_statement(statement_text, rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sql_ast::ast::VALUE_FORMAT_PROPERTY;
    use std::sync::Arc;
    use test_utils::fixtures;

    #[test]
    fn pins_identity_and_keeps_other_entries() {
        let clause = Properties::new()
            .with(KAFKA_TOPIC_NAME_PROPERTY, "topic")
            .with(VALUE_FORMAT_PROPERTY, "AVRO");
        let pinned = pin_topic_properties(&clause, &TopicProperties::new("expectedName", 10, 10));

        assert_eq!(pinned.len(), 4);
        assert_eq!(pinned.get(KAFKA_TOPIC_NAME_PROPERTY), Some(&Literal::string("expectedName")));
        assert_eq!(pinned.get(PARTITIONS_PROPERTY), Some(&Literal::Integer(10)));
        assert_eq!(pinned.get(REPLICAS_PROPERTY), Some(&Literal::Integer(10)));
        assert_eq!(pinned.get(VALUE_FORMAT_PROPERTY), Some(&Literal::string("AVRO")));
    }

    #[test]
    fn rewrite_regenerates_text_and_shares_query() {
        let cas = fixtures::simple_csas("x", "source");
        let configured = fixtures::configured(cas.clone());
        let rewritten = rewrite(&configured, &cas, &TopicProperties::new("name", 1, 1));

        assert_eq!(
            rewritten.statement_text(),
            "CREATE STREAM X WITH (REPLICAS = 1, PARTITIONS = 1, KAFKA_TOPIC = 'name') AS SELECT *\nFROM SOURCE SOURCE;"
        );
        let Statement::CreateAsSelect(new_cas) = rewritten.statement() else {
            panic!("expected a create-as-select");
        };
        assert!(Arc::ptr_eq(&new_cas.query, &cas.query));
        assert!(cas.properties.is_empty());
        assert!(Arc::ptr_eq(rewritten.config(), configured.config()));
    }
}
