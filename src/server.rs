use crate::config::{log_config, Config};
use crate::core_network::network;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// Only returns when the control listener cannot be set up.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config:");
    log_config(&config);

    if let Err(e) = network::start_server(Arc::new(config)).await {
        error!("Failed to start server: {:#}", e);
        return Err(e);
    }

    Ok(())
}
