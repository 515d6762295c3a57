//! Entrypoint for the deploy scripts

use clap::Parser;
use did_registry_scripts::{cli::Cli, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let config = cli.deployment_config()?;

    cli.command.run(cli.priv_key, cli.rpc_url, config).await
}
