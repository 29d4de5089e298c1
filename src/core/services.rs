//! Unified service container for Wealthpress
//!
//! Provides shared access to all core services.

use crate::core::config::{Config, ContentSourceKind};
use crate::core::content::{CmsClient, ContentSource, ContentStore, FixtureSource};
use crate::core::error::{Result, WealthpressError};
use crate::core::feed::FeedGenerator;
use crate::core::search::SearchRanker;
use crate::core::sitemap::SitemapGenerator;
use crate::core::subscription::NewsletterGateway;
use std::sync::Arc;
use std::time::Duration;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Current content snapshot and its source
    pub content: Arc<ContentStore>,

    /// Multi-entity fuzzy ranker
    pub ranker: Arc<SearchRanker>,

    /// RSS feed renderer
    pub feed: Arc<FeedGenerator>,

    /// Sitemap renderer
    pub sitemap: Arc<SitemapGenerator>,

    /// Subscriber API client, absent when no base URL is configured
    pub newsletter: Option<Arc<NewsletterGateway>>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration and an explicit content source
    ///
    /// The store starts empty; call `content.refresh()` to load.
    pub fn new(config: Config, source: Arc<dyn ContentSource>) -> Result<Self> {
        let newsletter = match config.newsletter_base_url() {
            Some(url) => Some(Arc::new(NewsletterGateway::new(
                url,
                config.content.api_token.clone(),
                Duration::from_secs(config.content.request_timeout_sec),
            )?)),
            None => None,
        };

        Ok(Self {
            content: Arc::new(ContentStore::new(source)),
            ranker: Arc::new(SearchRanker::new(&config.search)),
            feed: Arc::new(FeedGenerator::new(&config.site, &config.feed)),
            sitemap: Arc::new(SitemapGenerator::new(&config.site, &config.sitemap)),
            newsletter,
            config: Arc::new(config),
        })
    }

    /// Create services with the content source named in the config
    pub fn from_config(config: Config) -> Result<Self> {
        let source = source_from_config(&config)?;
        Self::new(config, source)
    }

    /// Newsletter gateway or a configuration error
    pub fn newsletter(&self) -> Result<&NewsletterGateway> {
        self.newsletter.as_deref().ok_or_else(|| {
            WealthpressError::ConfigError(
                "Newsletter is not configured (set newsletter.base_url or content.base_url)"
                    .to_string(),
            )
        })
    }
}

/// Build the configured content source
pub fn source_from_config(config: &Config) -> Result<Arc<dyn ContentSource>> {
    match config.content.source {
        ContentSourceKind::Cms => Ok(Arc::new(CmsClient::from_config(&config.content)?)),
        ContentSourceKind::Fixture => {
            let path = config.content.fixture_path.clone().ok_or_else(|| {
                WealthpressError::ConfigError(
                    "content.fixture_path is required for the fixture source".to_string(),
                )
            })?;
            Ok(Arc::new(FixtureSource::new(path)))
        }
    }
}
