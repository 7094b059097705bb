use catalog::{Getter, MemoryCatalog, Register};
use clap::Args;
use common::error::PipelineError;
use std::path::PathBuf;

use super::load_statement;

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// A `CREATE`, create-as-select or `DROP` statement file
    #[arg(long, short = 's', value_name = "FILE")]
    pub statement: PathBuf,
    /// Catalog file, created when missing
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,
}

#[derive(Debug, Args)]
pub struct SourcesArgs {
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,
}

pub fn handle_register(args: &RegisterArgs) -> Result<String, PipelineError> {
    let statement = load_statement(&args.statement)?;
    let catalog = MemoryCatalog::load_from(&args.catalog).map_err(PipelineError::init)?;

    let changed = catalog
        .register_statement(&statement, &statement.to_string())
        .map_err(PipelineError::run)?;
    catalog.flush_to(&args.catalog).map_err(PipelineError::run)?;

    Ok(match changed {
        Some(source) => format!("{source}"),
        None => "catalog unchanged".to_string(),
    })
}

/// One line per registered source, ordered by name.
pub fn handle_sources(args: &SourcesArgs) -> Result<String, PipelineError> {
    let catalog = MemoryCatalog::load_from(&args.catalog).map_err(PipelineError::init)?;
    Ok(catalog
        .list_sources()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
