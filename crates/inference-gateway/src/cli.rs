use std::error::Error;

use clap::{Parser, Subcommand};
use shared::error::CommonError;

use crate::commands::{
    self, completions::CompletionShell, openapi::OpenapiParams, serve::ServeParams,
};

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "inference-gateway", about = "HTTP gateway to a managed inference endpoint")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeParams),
    /// Print the OpenAPI document
    Openapi(OpenapiParams),
    /// Generate shell completions for inference-gateway
    Completions {
        /// Shell to generate completions for
        shell: CompletionShell,
    },
    /// Show version
    Version,
}

fn log_error_chain(err: &(dyn Error)) {
    let mut current: Option<&(dyn Error)> = err.source();

    while let Some(e) = current {
        eprintln!("Caused by: {e}");
        current = e.source();
    }
}

fn handle_error(err: &CommonError) {
    eprintln!("Error: {err}");
    log_error_chain(err);
    ::std::process::exit(1);
}

pub async fn run_cli(cli: Cli) -> Result<(), anyhow::Error> {
    let cmd_res = match cli.command {
        Commands::Serve(params) => commands::serve::cmd_serve(params).await,
        Commands::Openapi(params) => commands::openapi::cmd_openapi(params),
        Commands::Completions { shell } => commands::completions::cmd_completions(shell),
        Commands::Version => {
            println!("inference-gateway version: {CLI_VERSION}");
            Ok(())
        }
    };

    if let Err(e) = cmd_res {
        handle_error(&e);
    }
    Ok(())
}
