//! Statement fixtures. Builders here stand in for a parser: each returns the
//! AST the named SQL would parse to.

use std::sync::Arc;

use common::config::{EngineConfig, SessionOverrides};
use common::types::SourceKind;
use sql_ast::ast::{
    AliasedRelation, CreateAsSelect, CreateSource, DropSource, Expr, Ident, InsertInto, JoinType,
    Literal, Properties, Query, Relation, SelectItem, Statement, TableElement, TimeUnit,
    WindowDuration, WindowExpression, KAFKA_TOPIC_NAME_PROPERTY, VALUE_FORMAT_PROPERTY,
};
use sql_ast::ConfiguredStatement;

/// `CREATE STREAM <name> AS SELECT * FROM <source>;`
pub fn simple_csas(name: &str, source: &str) -> CreateAsSelect {
    CreateAsSelect::new(SourceKind::Stream, name, Query::select_all(Relation::table(source)))
}

/// `CREATE TABLE <name> AS SELECT * FROM <source>;`
pub fn simple_ctas(name: &str, source: &str) -> CreateAsSelect {
    CreateAsSelect::new(SourceKind::Table, name, Query::select_all(Relation::table(source)))
}

/// `CREATE TABLE <name> AS SELECT ID, COUNT(*) FROM <source> WINDOW TUMBLING (SIZE 10 SECONDS) GROUP BY ID;`
pub fn windowed_ctas(name: &str, source: &str) -> CreateAsSelect {
    let mut query = Query::select_all(Relation::table(source))
        .with_window(WindowExpression::Tumbling {
            size: WindowDuration::new(10, TimeUnit::Seconds),
        })
        .with_group_by(vec![Expr::column("id")]);
    query.projection = vec![
        SelectItem::Expr {
            expr: Expr::column("id"),
            alias: None,
        },
        SelectItem::Expr {
            expr: Expr::function("count", vec![Expr::Wildcard]),
            alias: None,
        },
    ];
    CreateAsSelect::new(SourceKind::Table, name, query)
}

/// `CREATE STREAM <name> AS SELECT * FROM <left> JOIN <right> ON <left>.ID = <right>.ID;`
pub fn joined_csas(name: &str, left: &str, right: &str) -> CreateAsSelect {
    let from = Relation::join(
        JoinType::Inner,
        Relation::table(left),
        AliasedRelation::new(right),
        Expr::equals(Expr::qualified(left, "id"), Expr::qualified(right, "id")),
    );
    CreateAsSelect::new(SourceKind::Stream, name, Query::select_all(from))
}

fn create_source(kind: SourceKind, name: &str, topic: &str) -> CreateSource {
    CreateSource {
        name: Ident::new(name),
        kind,
        if_not_exists: false,
        elements: vec![
            TableElement {
                name: Ident::new("id"),
                data_type: "bigint".into(),
            },
            TableElement {
                name: Ident::new("payload"),
                data_type: "string".into(),
            },
        ],
        properties: Properties::new()
            .with(KAFKA_TOPIC_NAME_PROPERTY, topic)
            .with(VALUE_FORMAT_PROPERTY, Literal::string("JSON")),
    }
}

/// `CREATE STREAM <name> (ID BIGINT, PAYLOAD STRING) WITH (KAFKA_TOPIC = '<topic>', VALUE_FORMAT = 'JSON');`
pub fn create_stream(name: &str, topic: &str) -> CreateSource {
    create_source(SourceKind::Stream, name, topic)
}

/// `CREATE TABLE <name> (ID BIGINT, PAYLOAD STRING) WITH (KAFKA_TOPIC = '<topic>', VALUE_FORMAT = 'JSON');`
pub fn create_table(name: &str, topic: &str) -> CreateSource {
    create_source(SourceKind::Table, name, topic)
}

/// One statement of every kind that is not a create-as-select.
pub fn non_cas_statements() -> Vec<Statement> {
    let query = Arc::new(Query::select_all(Relation::table("source")));
    vec![
        Statement::CreateSource(create_stream("source", "source_topic")),
        Statement::CreateSource(create_table("lookup", "lookup_topic")),
        Statement::InsertInto(InsertInto {
            target: Ident::new("sink"),
            query: Arc::clone(&query),
        }),
        Statement::Query(query),
        Statement::DropSource(DropSource {
            name: Ident::new("source"),
            kind: SourceKind::Stream,
            if_exists: true,
            delete_topic: false,
        }),
        Statement::ListProperties,
        Statement::ListTopics,
        Statement::ListStreams,
        Statement::ListTables,
        Statement::SetProperty {
            name: "auto.offset.reset".into(),
            value: "earliest".into(),
        },
        Statement::UnsetProperty {
            name: "auto.offset.reset".into(),
        },
    ]
}

pub fn configured(statement: impl Into<Statement>) -> ConfiguredStatement {
    ConfiguredStatement::of(statement.into(), SessionOverrides::new(), EngineConfig::new())
}

pub fn configured_with(
    statement: impl Into<Statement>,
    overrides: SessionOverrides,
    config: EngineConfig,
) -> ConfiguredStatement {
    ConfiguredStatement::of(statement.into(), overrides, config)
}
