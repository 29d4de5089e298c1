//! Feed command - render an RSS feed to stdout

use crate::cli::OutputFormat;
use crate::core::feed::FeedScope;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the feed command
///
/// With no scope flag the site-wide feed is rendered.
#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct FeedArgs {
    /// Feed for one category
    #[arg(long)]
    pub category: Option<String>,

    /// Feed for one subcategory
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Feed for one author
    #[arg(long)]
    pub author: Option<String>,

    /// Feed for one tag
    #[arg(long)]
    pub tag: Option<String>,
}

impl FeedArgs {
    pub fn scope(&self) -> FeedScope {
        if let Some(slug) = &self.category {
            FeedScope::Category(slug.clone())
        } else if let Some(slug) = &self.subcategory {
            FeedScope::Subcategory(slug.clone())
        } else if let Some(slug) = &self.author {
            FeedScope::Author(slug.clone())
        } else if let Some(slug) = &self.tag {
            FeedScope::Tag(slug.clone())
        } else {
            FeedScope::All
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedOutput {
    pub path: String,
    pub cache_control: String,
    pub xml: String,
}

/// Execute the feed command
pub async fn execute(
    args: FeedArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::load_content(services).await?;
    let scope = args.scope();
    let xml = services.feed.render(&snapshot, &scope)?;

    match format {
        OutputFormat::Human => print!("{xml}"),
        OutputFormat::Json => {
            let output = FeedOutput {
                path: scope.path(),
                cache_control: services.feed.cache_control(),
                xml,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
