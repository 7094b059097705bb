use catalog::Getter;
use sql_ast::ast::{AliasedRelation, Query, Relation};

use crate::error::TopicInjectionError;

/// The relation whose topic a query's sink inherits physical properties
/// from: the relation itself, or the left-most side of a join.
pub fn resolve_anchor(relation: &Relation) -> &AliasedRelation {
    match relation {
        Relation::Table(table) => table,
        Relation::Join(join) => resolve_anchor(&join.left),
    }
}

/// Kafka topic backing the anchor relation of `query`.
pub fn anchor_topic<M: Getter + ?Sized>(
    metastore: &M,
    query: &Query,
) -> Result<String, TopicInjectionError> {
    let name = resolve_anchor(&query.from).name.normalized();
    metastore
        .get_source(&name)
        .map(|source| source.kafka_topic_name().to_string())
        .map_err(|e| TopicInjectionError::unresolved_source(&name, e))
}
