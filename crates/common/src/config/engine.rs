use crate::config::error::ConfigError;
use crate::config::traits::{ConfigValue, PropertySource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix prepended to generated output topic names.
pub const OUTPUT_TOPIC_NAME_PREFIX_CONFIG: &str = "ksql.output.topic.name.prefix";
/// Default partition count for sink topics when the statement does not pin one.
pub const SINK_PARTITIONS_CONFIG: &str = "ksql.sink.partitions";
/// Default replica count for sink topics when the statement does not pin one.
pub const SINK_REPLICAS_CONFIG: &str = "ksql.sink.replicas";

/// Snapshot of the engine wide configuration a statement was prepared with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineConfig {
    props: BTreeMap<String, ConfigValue>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_props<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        Self {
            props: props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Copy of this config with `key` set to `value`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        let mut props = self.props.clone();
        props.insert(key.into(), value.into());
        Self { props }
    }

    pub fn props(&self) -> &BTreeMap<String, ConfigValue> {
        &self.props
    }

    pub fn output_topic_prefix(&self) -> Result<Option<String>, ConfigError> {
        self.string(OUTPUT_TOPIC_NAME_PREFIX_CONFIG)
    }
}

impl PropertySource for EngineConfig {
    fn origin(&self) -> &'static str {
        "engine config"
    }

    fn raw(&self, key: &str) -> Option<&ConfigValue> {
        self.props.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;
    use serde_json::json;

    #[test]
    fn typed_accessors_coerce_values() {
        let config = EngineConfig::from_props([
            (SINK_PARTITIONS_CONFIG, json!(4)),
            (SINK_REPLICAS_CONFIG, json!("3")),
            (OUTPUT_TOPIC_NAME_PREFIX_CONFIG, json!("dev-")),
        ]);

        assert_eq!(config.int(SINK_PARTITIONS_CONFIG).unwrap(), Some(4));
        assert_eq!(config.int(SINK_REPLICAS_CONFIG).unwrap(), Some(3));
        assert_eq!(config.output_topic_prefix().unwrap().as_deref(), Some("dev-"));
        assert_eq!(config.int("missing").unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_integers() {
        let config = EngineConfig::new().with(SINK_PARTITIONS_CONFIG, "lots");
        let err = config.int(SINK_PARTITIONS_CONFIG).unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { .. });
    }

    #[test]
    fn with_leaves_the_original_untouched() {
        let base = EngineConfig::new();
        let updated = base.with(OUTPUT_TOPIC_NAME_PREFIX_CONFIG, "p-");
        assert!(!base.contains(OUTPUT_TOPIC_NAME_PREFIX_CONFIG));
        assert!(updated.contains(OUTPUT_TOPIC_NAME_PREFIX_CONFIG));
    }
}
