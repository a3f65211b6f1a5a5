use anyhow::Context;
use clap::Parser;
use qremix_server::{logging, ApiServer, CliArgs, ConfigManager};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = ConfigManager::load_with_args(&args).context("failed to load configuration")?;

    logging::init_logging(&config)?;
    info!("Starting qremix-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Log level: {}", config.log_level);

    let server = ApiServer::new(config).context("failed to build completion engine")?;
    server.run().await?;

    Ok(())
}
