use std::path::PathBuf;

use clap::Parser;
use gateway::router::generate_openapi_spec;
use shared::error::CommonError;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct OpenapiParams {
    /// Write the document to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn cmd_openapi(params: OpenapiParams) -> Result<(), CommonError> {
    let document = render_openapi_document()?;

    match params.output {
        Some(path) => {
            std::fs::write(&path, document)?;
            info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}

fn render_openapi_document() -> Result<String, CommonError> {
    Ok(serde_json::to_string_pretty(&generate_openapi_spec())?)
}
