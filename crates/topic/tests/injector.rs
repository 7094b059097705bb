use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use catalog::{DataSource, KsqlTopic, MemoryCatalog, Register};
use common::config::engine::{
    OUTPUT_TOPIC_NAME_PREFIX_CONFIG, SINK_PARTITIONS_CONFIG, SINK_REPLICAS_CONFIG,
};
use common::config::{EngineConfig, SessionOverrides};
use common::types::{SourceKind, TopicConfigOverrides, TopicDescription};
use matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_clients::{CreateTopicRequest, InMemoryTopicClient};
use sql_ast::ast::{
    Literal, Properties, Statement, KAFKA_TOPIC_NAME_PROPERTY, PARTITIONS_PROPERTY,
    REPLICAS_PROPERTY,
};
use sql_ast::ConfiguredStatement;
use test_utils::fixtures;
use topic::{
    Injector, SourceDescriptionSupplier, TopicCreateInjector, TopicInjectionError,
    TopicProperties, TopicPropertiesBuilder,
};

#[derive(Default)]
struct Recorded {
    name: Option<String>,
    with_clause: Option<Properties>,
    overrides: Option<SessionOverrides>,
    config: Option<Arc<EngineConfig>>,
    described: Option<TopicDescription>,
}

/// Builder that records its inputs and returns a fixed identity. The source
/// supplier is invoked once so tests can check which topic it describes.
struct RecordingBuilder<'a> {
    recorded: Rc<RefCell<Recorded>>,
    result: TopicProperties,
    source: Option<SourceDescriptionSupplier<'a>>,
}

impl RecordingBuilder<'_> {
    fn returning(recorded: &Rc<RefCell<Recorded>>, result: TopicProperties) -> Self {
        Self {
            recorded: Rc::clone(recorded),
            result,
            source: None,
        }
    }
}

impl<'a> TopicPropertiesBuilder<'a> for RecordingBuilder<'a> {
    fn with_name(self, name: String) -> Self {
        self.recorded.borrow_mut().name = Some(name);
        self
    }

    fn with_with_clause(self, properties: Properties) -> Self {
        self.recorded.borrow_mut().with_clause = Some(properties);
        self
    }

    fn with_overrides(self, overrides: SessionOverrides) -> Self {
        self.recorded.borrow_mut().overrides = Some(overrides);
        self
    }

    fn with_config(self, config: Arc<EngineConfig>) -> Self {
        self.recorded.borrow_mut().config = Some(config);
        self
    }

    fn with_source(mut self, source: SourceDescriptionSupplier<'a>) -> Self {
        self.source = Some(source);
        self
    }

    fn build(self) -> Result<TopicProperties, TopicInjectionError> {
        if let Some(source) = &self.source {
            self.recorded.borrow_mut().described = source().ok();
        }
        Ok(self.result)
    }
}

struct Harness {
    client: Arc<InMemoryTopicClient>,
    catalog: MemoryCatalog,
    injector: TopicCreateInjector<Arc<InMemoryTopicClient>, MemoryCatalog>,
    recorded: Rc<RefCell<Recorded>>,
}

impl Harness {
    fn new() -> Self {
        let catalog = MemoryCatalog::new();
        catalog
            .register_source(DataSource::new("SOURCE", SourceKind::Stream, KsqlTopic::new("source")))
            .unwrap();
        catalog
            .register_source(DataSource::new(
                "J_SOURCE",
                SourceKind::Stream,
                KsqlTopic::new("jSource"),
            ))
            .unwrap();

        let client = Arc::new(
            InMemoryTopicClient::new()
                .with_topic(TopicDescription::uniform("source", 4, 3))
                .with_topic(TopicDescription::uniform("jSource", 12, 1)),
        );
        let injector = TopicCreateInjector::new(Arc::clone(&client), catalog.clone());
        Self {
            client,
            catalog,
            injector,
            recorded: Rc::default(),
        }
    }

    fn builder<'a>(&self, result: TopicProperties) -> RecordingBuilder<'a> {
        RecordingBuilder::returning(&self.recorded, result)
    }

    fn inject_recorded(&self, statement: ConfiguredStatement) -> ConfiguredStatement {
        self.injector
            .inject_with(statement, self.builder(TopicProperties::new("name", 1, 1)))
            .unwrap()
    }

    fn inject_expecting(&self, statement: ConfiguredStatement) -> ConfiguredStatement {
        self.injector
            .inject_with(statement, self.builder(TopicProperties::new("expectedName", 10, 10)))
            .unwrap()
    }
}

fn with_topic(cas: sql_ast::ast::CreateAsSelect) -> sql_ast::ast::CreateAsSelect {
    let properties = cas.properties.with(KAFKA_TOPIC_NAME_PROPERTY, "topic");
    cas.with_properties(properties)
}

#[test]
fn should_do_nothing_for_non_create_as_select() {
    let harness = Harness::new();
    for statement in fixtures::non_cas_statements() {
        let configured = fixtures::configured(statement);
        let result = harness.injector.inject(configured.clone()).unwrap();
        assert!(result.is_same_statement(&configured));
        assert_eq!(result.statement_text(), configured.statement_text());
    }
    assert!(harness.client.create_requests().is_empty());
    assert_eq!(harness.client.describe_calls(), 0);
}

#[test]
fn should_generate_name() {
    let harness = Harness::new();
    harness.inject_recorded(fixtures::configured(fixtures::simple_csas("x", "source")));
    assert_eq!(harness.recorded.borrow().name.as_deref(), Some("X"));
}

#[test]
fn should_generate_name_with_prefix_from_overrides() {
    let harness = Harness::new();
    let statement = fixtures::configured_with(
        fixtures::simple_csas("x", "source"),
        SessionOverrides::from_props([(OUTPUT_TOPIC_NAME_PREFIX_CONFIG, json!("prefix-"))]),
        EngineConfig::from_props([(OUTPUT_TOPIC_NAME_PREFIX_CONFIG, json!("nope"))]),
    );
    harness.inject_recorded(statement);
    assert_eq!(harness.recorded.borrow().name.as_deref(), Some("prefix-X"));
}

#[test]
fn should_generate_name_with_prefix_from_config() {
    let harness = Harness::new();
    let statement = fixtures::configured(fixtures::simple_csas("x", "source")).with_config(
        EngineConfig::from_props([(OUTPUT_TOPIC_NAME_PREFIX_CONFIG, json!("prefix-"))]),
    );
    harness.inject_recorded(statement);
    assert_eq!(harness.recorded.borrow().name.as_deref(), Some("prefix-X"));
}

#[test]
fn should_pass_through_clause_overrides_and_config() {
    let harness = Harness::new();
    let cas = with_topic(fixtures::simple_csas("x", "source"));
    let overrides = SessionOverrides::from_props([("auto.offset.reset", json!("earliest"))]);
    let statement = fixtures::configured_with(cas.clone(), overrides.clone(), EngineConfig::new());

    harness.inject_recorded(statement.clone());

    let recorded = harness.recorded.borrow();
    assert_eq!(recorded.with_clause.as_ref(), Some(&cas.properties));
    assert_eq!(recorded.overrides.as_ref(), Some(&overrides));
    assert!(Arc::ptr_eq(
        recorded.config.as_ref().unwrap(),
        statement.config()
    ));
}

#[test]
fn should_identify_and_use_correct_source() {
    let harness = Harness::new();
    harness.inject_recorded(fixtures::configured(with_topic(fixtures::simple_csas(
        "x", "source",
    ))));
    assert_eq!(
        harness.recorded.borrow().described,
        Some(TopicDescription::uniform("source", 4, 3))
    );
}

#[test]
fn should_identify_and_use_correct_source_in_join() {
    let harness = Harness::new();
    harness.inject_recorded(fixtures::configured(with_topic(fixtures::joined_csas(
        "x", "source", "j_source",
    ))));
    assert_eq!(
        harness.recorded.borrow().described,
        Some(TopicDescription::uniform("source", 4, 3))
    );
}

#[test]
fn should_build_with_clause_with_topic_properties() {
    let harness = Harness::new();
    let result = harness.inject_expecting(fixtures::configured(with_topic(
        fixtures::simple_csas("x", "source"),
    )));

    let Statement::CreateAsSelect(cas) = result.statement() else {
        panic!("expected a create-as-select");
    };
    assert_eq!(
        cas.properties.get(KAFKA_TOPIC_NAME_PROPERTY),
        Some(&Literal::string("expectedName"))
    );
    assert_eq!(cas.properties.get(PARTITIONS_PROPERTY), Some(&Literal::Integer(10)));
    assert_eq!(cas.properties.get(REPLICAS_PROPERTY), Some(&Literal::Integer(10)));
}

#[test]
fn should_update_statement_text() {
    let harness = Harness::new();
    let result = harness.inject_recorded(fixtures::configured(fixtures::simple_csas("x", "source")));
    assert_eq!(
        result.statement_text(),
        "CREATE STREAM X WITH (REPLICAS = 1, PARTITIONS = 1, KAFKA_TOPIC = 'name') AS SELECT *\nFROM SOURCE SOURCE;"
    );
}

#[test]
fn should_leave_input_statement_untouched() {
    let harness = Harness::new();
    let input = fixtures::configured(fixtures::simple_csas("x", "source"));
    let text = input.statement_text().to_string();

    let result = harness.inject_recorded(input.clone());

    assert!(!result.is_same_statement(&input));
    assert_eq!(input.statement_text(), text);
    assert!(input
        .statement()
        .as_create_as_select()
        .unwrap()
        .properties
        .is_empty());
}

#[test]
fn should_create_missing_topic() {
    let harness = Harness::new();
    harness.inject_expecting(fixtures::configured(with_topic(fixtures::simple_csas(
        "x", "source",
    ))));
    assert_eq!(
        harness.client.create_requests(),
        vec![CreateTopicRequest {
            name: "expectedName".into(),
            partitions: 10,
            replicas: 10,
            configs: TopicConfigOverrides::new(),
        }]
    );
}

#[test]
fn should_create_missing_topic_with_compact_cleanup_policy_for_non_windowed_tables() {
    let harness = Harness::new();
    harness.inject_expecting(fixtures::configured(with_topic(fixtures::simple_ctas(
        "x", "source",
    ))));
    assert_eq!(
        harness.client.create_requests()[0].configs,
        TopicConfigOverrides::from([("cleanup.policy".to_string(), "compact".to_string())])
    );
}

#[test]
fn should_create_missing_topic_with_default_cleanup_policy_for_windowed_tables() {
    let harness = Harness::new();
    harness.inject_expecting(fixtures::configured(with_topic(fixtures::windowed_ctas(
        "x", "source",
    ))));
    assert!(harness.client.create_requests()[0].configs.is_empty());
}

#[test]
fn should_fail_for_unknown_source() {
    let harness = Harness::new();
    let res = harness.injector.inject_with(
        fixtures::configured(fixtures::simple_csas("x", "missing")),
        harness.builder(TopicProperties::new("name", 1, 1)),
    );
    assert_matches!(res, Err(TopicInjectionError::UnresolvedSource { .. }));
    assert!(harness.client.create_requests().is_empty());
}

#[test]
fn should_propagate_provisioning_failure() {
    let harness = Harness::new();
    harness
        .client
        .add_topic(TopicDescription::uniform("expectedName", 2, 2));
    let res = harness.injector.inject_with(
        fixtures::configured(fixtures::simple_csas("x", "source")),
        harness.builder(TopicProperties::new("expectedName", 10, 10)),
    );
    assert_matches!(res, Err(TopicInjectionError::Provision { .. }));
}

#[test]
fn default_builder_inherits_source_layout() {
    let harness = Harness::new();
    let result = harness
        .injector
        .inject(fixtures::configured(fixtures::simple_csas("x", "source")))
        .unwrap();

    assert_eq!(
        result.statement_text(),
        "CREATE STREAM X WITH (REPLICAS = 3, PARTITIONS = 4, KAFKA_TOPIC = 'X') AS SELECT *\nFROM SOURCE SOURCE;"
    );
    assert_eq!(harness.client.topic("X"), Some(TopicDescription::uniform("X", 4, 3)));
    assert_eq!(harness.client.describe_calls(), 1);
}

#[test]
fn default_builder_fails_without_provisioning_when_source_topic_is_missing() {
    let harness = Harness::new();
    harness
        .catalog
        .register_source(DataSource::new("ORPHAN", SourceKind::Stream, KsqlTopic::new("orphan")))
        .unwrap();

    let res = harness
        .injector
        .inject(fixtures::configured(fixtures::simple_csas("x", "orphan")));

    assert_matches!(res, Err(TopicInjectionError::SourceDescription { .. }));
    assert_eq!(harness.client.describe_calls(), 1);
    assert!(harness.client.create_requests().is_empty());
    assert_eq!(harness.client.topic("X"), None);
}

#[test]
fn default_builder_does_not_describe_fully_pinned_sink() {
    let harness = Harness::new();
    let cas = fixtures::simple_csas("x", "source");
    let cas = cas.with_properties(
        Properties::new()
            .with(PARTITIONS_PROPERTY, 2i64)
            .with(REPLICAS_PROPERTY, 1i64),
    );
    harness.injector.inject(fixtures::configured(cas)).unwrap();
    assert_eq!(harness.client.describe_calls(), 0);
}

#[test]
fn default_builder_uses_sink_defaults_from_config() {
    let harness = Harness::new();
    let statement = fixtures::configured_with(
        fixtures::simple_ctas("totals", "source"),
        SessionOverrides::from_props([(SINK_REPLICAS_CONFIG, json!(2))]),
        EngineConfig::from_props([(SINK_PARTITIONS_CONFIG, json!(6))]),
    );
    let result = harness.injector.inject(statement).unwrap();
    assert_eq!(
        result.statement_text(),
        "CREATE TABLE TOTALS WITH (REPLICAS = 2, PARTITIONS = 6, KAFKA_TOPIC = 'TOTALS') AS SELECT *\nFROM SOURCE SOURCE;"
    );
    assert_eq!(harness.client.describe_calls(), 0);
}

#[test]
fn reinjecting_is_stable() {
    let harness = Harness::new();
    let first = harness
        .injector
        .inject(fixtures::configured(fixtures::simple_csas("x", "source")))
        .unwrap();
    let second = harness.injector.inject(first.clone()).unwrap();

    assert_eq!(first.statement_text(), second.statement_text());
    assert_eq!(
        first.statement().as_create_as_select().unwrap().properties,
        second.statement().as_create_as_select().unwrap().properties
    );
    assert_eq!(harness.client.create_requests().len(), 2);
}

#[test]
fn injected_sink_can_be_registered() {
    let harness = Harness::new();
    let result = harness
        .injector
        .inject(fixtures::configured(fixtures::simple_ctas("totals", "source")))
        .unwrap();

    let registered = harness
        .catalog
        .register_statement(result.statement(), result.statement_text())
        .unwrap()
        .unwrap();
    assert_eq!(registered.kafka_topic_name(), "TOTALS");
    assert_eq!(registered.kind, SourceKind::Table);
}
