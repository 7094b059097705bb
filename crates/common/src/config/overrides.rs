use crate::config::error::ConfigError;
use crate::config::traits::{ConfigValue, PropertySource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Properties a session set on top of the engine configuration.
///
/// Overrides shadow the engine configuration key by key; they are never
/// merged into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionOverrides {
    props: BTreeMap<String, ConfigValue>,
}

impl SessionOverrides {
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

    /// Parses `key=value` assignments as typed on a command line. Values that
    /// look like integers are stored as numbers.
    pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, ConfigError> {
        let mut props = BTreeMap::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment.split_once('=').ok_or_else(|| {
                ConfigError::parse_error(format!(
                    "expected an assignment of the form key=value but got '{assignment}'"
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::parse_error(format!(
                    "missing property name in '{assignment}'"
                )));
            }
            let value = value.trim();
            let value = match value.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::from(value),
            };
            props.insert(key.to_string(), value);
        }
        Ok(Self { props })
    }

    pub fn with(&self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        let mut props = self.props.clone();
        props.insert(key.into(), value.into());
        Self { props }
    }

    pub fn props(&self) -> &BTreeMap<String, ConfigValue> {
        &self.props
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl PropertySource for SessionOverrides {
    fn origin(&self) -> &'static str {
        "session overrides"
    }

    fn raw(&self, key: &str) -> Option<&ConfigValue> {
        self.props.get(key)
    }
}
