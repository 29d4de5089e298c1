//! Sitemap command - render the sitemap to stdout

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the sitemap command
#[derive(Args, Debug)]
pub struct SitemapArgs {
    /// List entries instead of printing XML
    #[arg(long, short = 'l')]
    pub list: bool,
}

/// Execute the sitemap command
pub async fn execute(
    args: SitemapArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::load_content(services).await?;

    match format {
        OutputFormat::Human if args.list => {
            let entries = services.sitemap.entries(&snapshot);
            for entry in &entries {
                let lastmod = entry
                    .lastmod
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let priority = entry
                    .priority
                    .map(|p| format!("{p:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}  {}  {}",
                    colors::number(&priority),
                    colors::dim(&format!("{lastmod:<10}")),
                    colors::dim(&format!(
                        "{:<7}",
                        entry.changefreq.map(|f| f.as_str()).unwrap_or("-")
                    )),
                    colors::url(&entry.loc)
                );
            }
            println!(
                "\n{} URL(s)",
                colors::number(&entries.len().to_string())
            );
        }
        OutputFormat::Human => print!("{}", services.sitemap.render(&snapshot)),
        OutputFormat::Json => {
            let entries = services.sitemap.entries(&snapshot);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
