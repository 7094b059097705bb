use common::config::engine::OUTPUT_TOPIC_NAME_PREFIX_CONFIG;
use common::config::{EngineConfig, PropertySource, SessionOverrides};
use common::error::ConfigError;
use sql_ast::ast::Ident;

/// The output topic prefix in effect: a session override shadows the engine
/// configuration, the two are never combined.
pub fn output_topic_prefix(
    overrides: &SessionOverrides,
    config: &EngineConfig,
) -> Result<Option<String>, ConfigError> {
    match overrides.string(OUTPUT_TOPIC_NAME_PREFIX_CONFIG)? {
        Some(prefix) => Ok(Some(prefix)),
        None => config.output_topic_prefix(),
    }
}

/// Default sink topic name for `target`: the prefix followed by the
/// normalized target name.
pub fn derive_topic_name(
    target: &Ident,
    overrides: &SessionOverrides,
    config: &EngineConfig,
) -> Result<String, ConfigError> {
    let prefix = output_topic_prefix(overrides, config)?.unwrap_or_default();
    Ok(format!("{prefix}{}", target.normalized()))
}
