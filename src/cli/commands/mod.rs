//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod completions;
pub mod config;
pub mod feed;
pub mod search;
pub mod serve;
pub mod sitemap;
pub mod subscribe;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use feed::FeedArgs;
pub use search::SearchArgs;
pub use serve::ServeArgs;
pub use sitemap::SitemapArgs;
pub use subscribe::{SubscribeArgs, UnsubscribeArgs};

use crate::core::error::Result;
use crate::core::services::Services;
use crate::core::types::ContentSnapshot;
use std::sync::Arc;

/// Fetch a fresh snapshot for one-shot commands
pub(crate) async fn load_content(services: &Services) -> Result<Arc<ContentSnapshot>> {
    services.content.refresh().await
}
