//! Serve command - run the HTTP server

use crate::core::config::Config;
use crate::core::logging;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Execute the serve command
pub async fn execute(
    _args: ServeArgs,
    services: Arc<Services>,
) -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    services.config.log_config();
    crate::http::start(services).await?;
    Ok(())
}
