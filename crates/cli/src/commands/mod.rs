pub mod catalog;
pub mod format;
pub mod inject;

pub use catalog::{handle_register, handle_sources, RegisterArgs, SourcesArgs};
pub use format::{handle_format, FormatArgs};
pub use inject::{handle_inject, InjectArgs};

use common::error::PipelineError;
use sql_ast::ast::Statement;
use std::fs;
use std::path::Path;

/// Reads a statement from a YAML or JSON file, picked by extension.
pub fn load_statement(path: &Path) -> Result<Statement, PipelineError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PipelineError::init_msg(format!("cannot read statement file {}: {e}", path.display()))
    })?;
    log::debug!("loaded statement file {}", path.display());

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&raw).map_err(PipelineError::init),
        _ => serde_yaml::from_str(&raw).map_err(PipelineError::init),
    }
}
