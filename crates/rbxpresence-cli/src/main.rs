//! rbxpresence entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use rbxpresence_cli::{Cli, CliResult};
use rbxpresence_core::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    init_tracing(cli.tracing_config())?;
    rbxpresence_cli::serve::run(&cli).await
}
