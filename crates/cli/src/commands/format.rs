use clap::Args;
use common::error::PipelineError;
use std::path::PathBuf;

use super::load_statement;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Statement file (YAML or JSON)
    #[arg(long, short = 's', value_name = "FILE")]
    pub statement: PathBuf,
}

/// Canonical text of the statement in `args.statement`.
pub fn handle_format(args: &FormatArgs) -> Result<String, PipelineError> {
    Ok(load_statement(&args.statement)?.to_string())
}
