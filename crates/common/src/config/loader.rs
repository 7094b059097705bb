use crate::config::engine::EngineConfig;
use crate::config::error::ConfigError;
use crate::config::traits::ConfigValue;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Loads an engine configuration file. The format is picked from the file
/// extension (`yml`/`yaml`, `toml` or `json`).
///
/// Nested tables are flattened into dotted keys so that
/// `ksql: { sink: { partitions: 4 } }` and `"ksql.sink.partitions": 4` mean
/// the same thing. TOML in particular turns bare dotted keys into tables.
pub fn read_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::incorrect_path(path));
    }
    debug!("loading engine config from {}", path.display());
    let raw = fs::read_to_string(path)?;

    let parsed: BTreeMap<String, ConfigValue> =
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => {
                if raw.trim().is_empty() {
                    BTreeMap::new()
                } else {
                    serde_yaml::from_str(&raw)?
                }
            }
            Some("toml") => toml::from_str(&raw)?,
            Some("json") => serde_json::from_str(&raw)?,
            other => {
                return Err(ConfigError::parse_error(format!(
                    "unsupported config format {:?} for {}",
                    other,
                    path.display()
                )))
            }
        };

    let mut flat = BTreeMap::new();
    for (key, value) in parsed {
        flatten_into(&mut flat, key, value);
    }
    Ok(EngineConfig::from_props(flat))
}

fn flatten_into(out: &mut BTreeMap<String, ConfigValue>, key: String, value: Value) {
    match value {
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(out, format!("{key}.{child}"), value);
            }
        }
        other => {
            out.insert(key, other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engine::{
        OUTPUT_TOPIC_NAME_PREFIX_CONFIG, SINK_PARTITIONS_CONFIG, SINK_REPLICAS_CONFIG,
    };
    use crate::config::traits::PropertySource;
    use matches::assert_matches;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().expect("tempfile");
        file.write_all(body.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_flat_yaml() {
        let file = write_config(
            ".yml",
            "ksql.output.topic.name.prefix: \"prod-\"\nksql.sink.partitions: 12\n",
        );
        let config = read_engine_config(file.path()).expect("config loads");
        assert_eq!(
            config.output_topic_prefix().unwrap().as_deref(),
            Some("prod-")
        );
        assert_eq!(config.int(SINK_PARTITIONS_CONFIG).unwrap(), Some(12));
    }

    #[test]
    fn flattens_toml_dotted_keys() {
        let file = write_config(
            ".toml",
            "\"ksql.output.topic.name.prefix\" = \"p-\"\nksql.sink.partitions = 4\nksql.sink.replicas = 2\n",
        );
        let config = read_engine_config(file.path()).expect("config loads");
        assert_eq!(config.int(SINK_PARTITIONS_CONFIG).unwrap(), Some(4));
        assert_eq!(config.int(SINK_REPLICAS_CONFIG).unwrap(), Some(2));
        assert_eq!(
            config.string(OUTPUT_TOPIC_NAME_PREFIX_CONFIG).unwrap().as_deref(),
            Some("p-")
        );
    }

    #[test]
    fn loads_json() {
        let file = write_config(".json", r#"{"ksql.sink.replicas": "3"}"#);
        let config = read_engine_config(file.path()).expect("config loads");
        assert_eq!(config.int(SINK_REPLICAS_CONFIG).unwrap(), Some(3));
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_config(".ini", "a=b");
        let err = read_engine_config(file.path()).unwrap_err();
        assert_matches!(err, ConfigError::ParseError { .. });
    }

    #[test]
    fn missing_file_is_an_incorrect_path() {
        let err = read_engine_config(Path::new("/definitely/not/here.yml")).unwrap_err();
        assert_matches!(err, ConfigError::IncorrectPath { .. });
    }
}
