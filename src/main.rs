/// Main entry point for the market status service
use tracing::info;

use openbell::calendar::default_registry;
use openbell::config::load_config;
use openbell::error::Result;
use openbell::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("openbell=debug,info")
        .init();

    info!("Starting market status service...");

    // Load configuration
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = load_config(&config_path)?;
    info!("Configuration loaded");

    // Build the calendar registry
    let registry = default_registry()?;
    info!("Calendar registry built for {} year(s)", registry.len());

    server::run_server(config, registry).await
}
