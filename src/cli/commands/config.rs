//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Include search tuning (thresholds and field weights)
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
///
/// The CMS API token is never serialized.
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub data_dir: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        data_dir: xdg.data_dir.to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::url(&response.config_file));
            println!("  data_dir: {}", colors::url(&response.data_dir));
            println!("  server: {}:{}", config.server.host, config.server.port);
            println!("  site:");
            println!("    base_url: {}", config.site.base_url);
            println!("    title: {}", config.site.title);
            println!("    language: {}", config.site.language);
            println!("  content:");
            println!("    source: {:?}", config.content.source);
            if let Some(url) = &config.content.base_url {
                println!("    base_url: {url}");
            }
            if let Some(path) = &config.content.fixture_path {
                println!("    fixture_path: {}", path.display());
            }
            println!(
                "    api_token: {}",
                if config.content.api_token.is_some() {
                    "[REDACTED]"
                } else {
                    "(none)"
                }
            );
            println!(
                "    refresh_interval_sec: {}",
                config.content.refresh_interval_sec
            );
            println!("  search:");
            println!("    min_query_length: {}", config.search.min_query_length);
            println!("    max_query_length: {}", config.search.max_query_length);
            if args.all {
                println!("    distance: {}", config.search.distance);
                for (name, tuning) in [
                    ("article", &config.search.article),
                    ("author", &config.search.author),
                    ("tag", &config.search.tag),
                    ("category", &config.search.category),
                    ("subcategory", &config.search.subcategory),
                ] {
                    let weights: Vec<String> = tuning
                        .weights
                        .iter()
                        .map(|(field, w)| format!("{field}={w}"))
                        .collect();
                    println!(
                        "    {name}: threshold={} {}",
                        tuning.threshold,
                        colors::dim(&weights.join(" "))
                    );
                }
            }
            println!("  feed:");
            println!("    max_items: {}", config.feed.max_items);
            println!(
                "  newsletter: {}",
                config.newsletter_base_url().unwrap_or("(disabled)")
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
