//! controller-coder binary.

use anyhow::Result;
use clap::Parser;
use controller_coder::{BackendKind, CoderConfig, ControllerCoder, LogFormat, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging(cli.verbose, format)?;

    let mut config = match &cli.config {
        Some(path) => CoderConfig::from_file(path)?,
        None => CoderConfig::load()?,
    };
    if let Some(code_base) = &cli.code_base {
        config = config.with_code_base(code_base);
    }

    if *config.backend() == BackendKind::Sampling {
        anyhow::bail!(
            "backend \"sampling\" needs a host sampling channel; the CLI only supports backend = \"direct\""
        );
    }

    let coder = ControllerCoder::from_config(&config)?;
    tracing::debug!(?config, "Configuration loaded");

    cli::run_command(&coder, cli.command).await
}
