use catalog::{MemoryCatalog, Register};
use clap::Args;
use common::config::loader::read_engine_config;
use common::config::{EngineConfig, SessionOverrides};
use common::error::PipelineError;
use shared_clients::RestProxyTopicClient;
use sql_ast::ConfiguredStatement;
use std::path::PathBuf;
use topic::{Injector, TopicCreateInjector};

use super::load_statement;

#[derive(Debug, Args)]
pub struct InjectArgs {
    /// Statement file (YAML or JSON)
    #[arg(long, short = 's', value_name = "FILE")]
    pub statement: PathBuf,
    /// Catalog file the source streams and tables are resolved from
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,
    /// Base URL of the Kafka REST proxy, e.g. http://localhost:8082
    #[arg(long, value_name = "URL")]
    pub rest_proxy: String,
    #[arg(long, value_name = "ID")]
    pub cluster_id: String,
    /// Engine config file (yml, toml or json)
    #[arg(long, value_name = "FILE")]
    pub engine_config: Option<PathBuf>,
    /// Session override, may be repeated
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// Register the created sink in the catalog file
    #[arg(long)]
    pub register: bool,
}

/// Runs topic injection against a REST proxy and returns the rewritten
/// statement text.
pub fn handle_inject(args: &InjectArgs) -> Result<String, PipelineError> {
    let statement = load_statement(&args.statement)?;
    let config = match &args.engine_config {
        Some(path) => read_engine_config(path).map_err(PipelineError::init)?,
        None => EngineConfig::new(),
    };
    let overrides = SessionOverrides::parse_assignments(&args.set).map_err(PipelineError::init)?;
    let catalog = MemoryCatalog::load_from(&args.catalog).map_err(PipelineError::init)?;
    let client = RestProxyTopicClient::new(&args.rest_proxy, &args.cluster_id)
        .map_err(PipelineError::init)?;

    let injector = TopicCreateInjector::new(client, catalog.clone());
    let injected = injector
        .inject(ConfiguredStatement::of(statement, overrides, config))
        .map_err(PipelineError::inject)?;

    if args.register && injected.statement().is_create_as_select() {
        let source = catalog
            .register_statement(injected.statement(), injected.statement_text())
            .map_err(PipelineError::run)?;
        catalog.flush_to(&args.catalog).map_err(PipelineError::run)?;
        if let Some(source) = source {
            log::info!("registered {source}");
        }
    }
    Ok(injected.statement_text().to_string())
}
