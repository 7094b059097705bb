use crate::config::error::ConfigError;
use serde_json::Value;

/// Values held by engine configuration and session overrides.
pub type ConfigValue = Value;

/// Read access to a flat `name -> value` property map.
///
/// Both the engine configuration and the per-session overrides are untyped
/// maps; the typed accessors here are the single place that decides how a
/// value is coerced.
pub trait PropertySource {
    /// Human readable name of the map, used in error messages.
    fn origin(&self) -> &'static str;

    fn raw(&self, key: &str) -> Option<&ConfigValue>;

    fn contains(&self, key: &str) -> bool {
        !matches!(self.raw(key), None | Some(Value::Null))
    }

    fn string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.raw(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(ConfigError::invalid_value(
                key,
                self.origin(),
                format!("expected a string but found {other}"),
            )),
        }
    }

    /// Integers may be given as numbers or as numeric strings.
    fn int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.raw(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
                ConfigError::invalid_value(
                    key,
                    self.origin(),
                    format!("expected an integer but found {n}"),
                )
            }),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                ConfigError::invalid_value(
                    key,
                    self.origin(),
                    format!("expected an integer but found '{s}'"),
                )
            }),
            Some(other) => Err(ConfigError::invalid_value(
                key,
                self.origin(),
                format!("expected an integer but found {other}"),
            )),
        }
    }
}
