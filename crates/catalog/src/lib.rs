pub mod error;
pub mod models;

pub use models::*;

use crate::error::CatalogError;
use common::types::{topic_name_violation, SourceKind};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sql_ast::ast::{
    CreateAsSelect, CreateSource, DropSource, Ident, Properties, Statement,
    KAFKA_TOPIC_NAME_PROPERTY, KEY_PROPERTY, VALUE_FORMAT_PROPERTY,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// internal flat state (easy to serde)
#[derive(Default, Serialize, Deserialize)]
struct State {
    sources: BTreeMap<String, DataSource>,
}

/// Metastore held in memory, optionally persisted as a JSON document.
///
/// Source names are stored in their normalized form, so lookups of unquoted
/// names are case-insensitive.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<State>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog flushed by [`MemoryCatalog::flush_to`]. A missing file
    /// yields an empty catalog.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let state = match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => State::default(),
            Err(e) => {
                return Err(CatalogError::io(
                    format!("failed to read catalog {}", path.display()),
                    e,
                ))
            }
        };
        Ok(Self {
            inner: Arc::new(RwLock::new(state)),
        })
    }

    pub fn flush_to(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.inner.read())?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(tmp, path)?;
        Ok(())
    }
}

fn required_topic(name: &Ident, properties: &Properties) -> Result<KsqlTopic, CatalogError> {
    let kafka_topic_name = properties
        .get(KAFKA_TOPIC_NAME_PROPERTY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CatalogError::missing_property(&name.normalized(), KAFKA_TOPIC_NAME_PROPERTY))?;
    Ok(KsqlTopic {
        kafka_topic_name: kafka_topic_name.to_string(),
        value_format: properties
            .get(VALUE_FORMAT_PROPERTY)
            .and_then(|v| v.as_str())
            .map(str::to_string),
    })
}

fn source_from(
    name: &Ident,
    kind: SourceKind,
    properties: &Properties,
    statement_text: &str,
) -> Result<DataSource, CatalogError> {
    let mut source = DataSource::new(name.normalized(), kind, required_topic(name, properties)?);
    source.key_field = properties
        .get(KEY_PROPERTY)
        .and_then(|v| v.as_str())
        .map(str::to_string);
    source.statement_text = Some(statement_text.to_string());
    Ok(source)
}

pub trait Register: Send + Sync + 'static {
    fn register_source(&self, source: DataSource) -> Result<(), CatalogError>;
    /// Registers the source a DDL statement creates, or drops the one a
    /// `DROP` removes. Create-as-select statements must already name their
    /// sink topic.
    fn register_statement(
        &self,
        statement: &Statement,
        statement_text: &str,
    ) -> Result<Option<DataSource>, CatalogError>;
    fn drop_source(&self, name: &str) -> Result<DataSource, CatalogError>;
}

impl Register for MemoryCatalog {
    fn register_source(&self, source: DataSource) -> Result<(), CatalogError> {
        if let Some(reason) = topic_name_violation(source.kafka_topic_name()) {
            return Err(CatalogError::invalid_topic(&source.name, &reason));
        }
        let mut state = self.inner.write();
        if state.sources.contains_key(&source.name) {
            return Err(CatalogError::duplicate(source.name));
        }
        log::debug!("registering {source}");
        state.sources.insert(source.name.clone(), source);
        Ok(())
    }

    fn register_statement(
        &self,
        statement: &Statement,
        statement_text: &str,
    ) -> Result<Option<DataSource>, CatalogError> {
        match statement {
            Statement::CreateSource(CreateSource {
                name,
                kind,
                if_not_exists,
                properties,
                ..
            }) => {
                if *if_not_exists {
                    if let Ok(existing) = self.get_source(&name.normalized()) {
                        return Ok(Some(existing));
                    }
                }
                let source = source_from(name, *kind, properties, statement_text)?;
                self.register_source(source.clone())?;
                Ok(Some(source))
            }
            Statement::CreateAsSelect(CreateAsSelect {
                name,
                kind,
                properties,
                ..
            }) => {
                let source = source_from(name, *kind, properties, statement_text)?;
                self.register_source(source.clone())?;
                Ok(Some(source))
            }
            Statement::DropSource(DropSource {
                name, if_exists, ..
            }) => match self.drop_source(&name.normalized()) {
                Ok(dropped) => Ok(Some(dropped)),
                Err(CatalogError::NotFound { .. }) if *if_exists => Ok(None),
                Err(e) => Err(e),
            },
            other => Err(CatalogError::unsupported(format!(
                "statement does not change the catalog: {other}"
            ))),
        }
    }

    fn drop_source(&self, name: &str) -> Result<DataSource, CatalogError> {
        self.inner
            .write()
            .sources
            .remove(name)
            .ok_or_else(|| CatalogError::not_found(name))
    }
}

pub trait Getter: Send + Sync + 'static {
    fn get_source(&self, name: &str) -> Result<DataSource, CatalogError>;
    fn list_sources(&self) -> Vec<DataSource>;
}

impl Getter for MemoryCatalog {
    fn get_source(&self, name: &str) -> Result<DataSource, CatalogError> {
        self.inner
            .read()
            .sources
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(name))
    }

    fn list_sources(&self) -> Vec<DataSource> {
        self.inner.read().sources.values().cloned().collect()
    }
}

impl<T: Getter> Getter for Arc<T> {
    fn get_source(&self, name: &str) -> Result<DataSource, CatalogError> {
        (**self).get_source(name)
    }

    fn list_sources(&self) -> Vec<DataSource> {
        (**self).list_sources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;
    use test_utils::fixtures;

    #[test]
    fn registers_and_looks_up_sources() {
        let catalog = MemoryCatalog::new();
        catalog
            .register_source(DataSource::new(
                "ORDERS",
                SourceKind::Stream,
                KsqlTopic::new("orders_raw"),
            ))
            .unwrap();

        let source = catalog.get_source("ORDERS").unwrap();
        assert_eq!(source.kafka_topic_name(), "orders_raw");
        assert_eq!(catalog.list_sources().len(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let catalog = MemoryCatalog::new();
        let source = DataSource::new("ORDERS", SourceKind::Stream, KsqlTopic::new("t"));
        catalog.register_source(source.clone()).unwrap();
        assert_matches!(
            catalog.register_source(source),
            Err(CatalogError::Duplicate { .. })
        );
    }

    #[test]
    fn illegal_topic_names_are_rejected() {
        let catalog = MemoryCatalog::new();
        for topic in ["orders#v1", "orders/v1", "orders?v=1", ""] {
            assert_matches!(
                catalog.register_source(DataSource::new(
                    "ORDERS",
                    SourceKind::Stream,
                    KsqlTopic::new(topic),
                )),
                Err(CatalogError::InvalidTopic { .. })
            );
        }

        let create = Statement::CreateSource(fixtures::create_stream("pageviews", "page#views"));
        assert_matches!(
            catalog.register_statement(&create, &create.to_string()),
            Err(CatalogError::InvalidTopic { .. })
        );
        assert!(catalog.list_sources().is_empty());
    }

    #[test]
    fn unknown_source_is_not_found() {
        let catalog = MemoryCatalog::new();
        assert_matches!(catalog.get_source("NOPE"), Err(CatalogError::NotFound { .. }));
    }

    #[test]
    fn create_source_statement_registers_topic() {
        let catalog = MemoryCatalog::new();
        let create = Statement::CreateSource(fixtures::create_stream("pageviews", "pageviews_raw"));
        let source = catalog
            .register_statement(&create, &create.to_string())
            .unwrap()
            .unwrap();

        assert_eq!(source.name, "PAGEVIEWS");
        assert_eq!(source.kafka_topic_name(), "pageviews_raw");
        assert_eq!(source.topic.value_format.as_deref(), Some("JSON"));
        assert_eq!(source.statement_text.as_deref(), Some(create.to_string().as_str()));
    }

    #[test]
    fn create_as_select_needs_a_topic() {
        let catalog = MemoryCatalog::new();
        let cas = Statement::CreateAsSelect(fixtures::simple_csas("sink", "source"));
        assert_matches!(
            catalog.register_statement(&cas, "CREATE STREAM SINK AS SELECT * FROM SOURCE;"),
            Err(CatalogError::MissingProperty { .. })
        );
    }

    #[test]
    fn drop_if_exists_tolerates_missing_source() {
        let catalog = MemoryCatalog::new();
        let drop = Statement::DropSource(DropSource {
            name: Ident::new("gone"),
            kind: SourceKind::Table,
            if_exists: true,
            delete_topic: false,
        });
        assert_matches!(catalog.register_statement(&drop, "DROP TABLE IF EXISTS GONE;"), Ok(None));
    }

    #[test]
    fn catalog_survives_flush_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = MemoryCatalog::new();
        catalog
            .register_source(DataSource::new("CLICKS", SourceKind::Table, KsqlTopic::new("clicks")))
            .unwrap();
        catalog.flush_to(&path).unwrap();

        let reloaded = MemoryCatalog::load_from(&path).unwrap();
        assert_eq!(reloaded.get_source("CLICKS").unwrap().kind, SourceKind::Table);
        assert!(MemoryCatalog::load_from(dir.path().join("missing.json"))
            .unwrap()
            .list_sources()
            .is_empty());
    }
}
