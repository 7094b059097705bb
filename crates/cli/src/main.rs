use clap::{Parser, Subcommand};
use cli::commands::{
    handle_format, handle_inject, handle_register, handle_sources, FormatArgs, InjectArgs,
    RegisterArgs, SourcesArgs,
};
use common::error::PipelineError;

#[derive(Parser)]
#[command(name = "streamsmith", version)]
pub struct Cli {
    #[arg(
        long = "log-level",
        help = "log filter, takes precedence over RUST_LOG",
        global = true
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Print the canonical text of a statement
    Format(FormatArgs),
    /// Pin and create the sink topic of a create-as-select statement
    Inject(InjectArgs),
    /// Apply a DDL statement to a catalog file
    Register(RegisterArgs),
    /// List the sources in a catalog file
    Sources(SourcesArgs),
}

fn run_cmd(func: Result<String, PipelineError>) {
    match func {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.log_level.as_deref());

    match &cli.command {
        Cmd::Format(args) => run_cmd(handle_format(args)),
        Cmd::Inject(args) => run_cmd(handle_inject(args)),
        Cmd::Register(args) => run_cmd(handle_register(args)),
        Cmd::Sources(args) => run_cmd(handle_sources(args)),
    }
}
