//! Wealthpress HTTP server entry point
//!
//! Starts the REST API server: search, feeds, sitemap and newsletter.

use std::sync::Arc;

use wealthpress::core::config::Config;
use wealthpress::core::logging;
use wealthpress::core::services::Services;
use wealthpress::core::xdg::XdgDirs;
use wealthpress::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    logging::init();

    tracing::info!("Starting Wealthpress content service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.log_paths();

    // Ensure XDG directories exist
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;

    // Log configuration details
    config.log_config();

    // Create shared services
    let services = Arc::new(Services::from_config(config)?);

    // Initial load, background refresh, serve
    http::start(services).await?;

    Ok(())
}
