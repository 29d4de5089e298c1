//! Configuration management for the Wealthpress content service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, WealthpressError};
use crate::core::search::{fields, GroupCaps};
use crate::core::sitemap::ChangeFrequency;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub newsletter: NewsletterConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Public site identity, used to build absolute URLs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Canonical site origin, no trailing slash
    #[serde(default = "default_site_url")]
    pub base_url: String,

    #[serde(default = "default_site_title")]
    pub title: String,

    #[serde(default = "default_site_description")]
    pub description: String,

    /// RSS language code
    #[serde(default = "default_language")]
    pub language: String,
}

/// Where content snapshots come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSourceKind {
    /// Headless CMS REST API
    Cms,
    /// Local JSON file
    Fixture,
}

/// Content provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    #[serde(default = "default_source")]
    pub source: ContentSourceKind,

    /// CMS origin, e.g. https://cms.example.com
    #[serde(default)]
    pub base_url: Option<String>,

    /// CMS bearer token (never logged)
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,

    /// Snapshot JSON for the fixture source
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,

    /// Seconds between background refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_sec: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,

    /// Records per CMS page request
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Match threshold and field weights for one entity collection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollectionTuning {
    /// Maximum field distance that still counts as a match
    pub threshold: f64,

    /// Field name to relative weight; fields not listed are not searched
    pub weights: BTreeMap<String, f64>,
}

impl CollectionTuning {
    fn new(threshold: f64, weights: &[(&str, f64)]) -> Self {
        Self {
            threshold,
            weights: weights
                .iter()
                .map(|(name, w)| (name.to_string(), *w))
                .collect(),
        }
    }

    fn validate(&self, collection: &str, known_fields: &[&str]) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(WealthpressError::ConfigError(format!(
                "{collection} threshold must be within [0, 1]"
            )));
        }
        if self.weights.is_empty() {
            return Err(WealthpressError::ConfigError(format!(
                "{collection} must search at least one field"
            )));
        }
        for (field, weight) in &self.weights {
            if !known_fields.contains(&field.as_str()) {
                return Err(WealthpressError::ConfigError(format!(
                    "Unknown {collection} field '{field}' (valid: {})",
                    known_fields.join(", ")
                )));
            }
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(WealthpressError::ConfigError(format!(
                    "{collection} weight for '{field}' must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// A `[search.<collection>]` table as written in TOML
///
/// Keys left out keep the collection's default. A `weights` table
/// replaces the default weights as a whole.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TuningOverride {
    threshold: Option<f64>,
    weights: Option<BTreeMap<String, f64>>,
}

impl TuningOverride {
    fn apply(self, mut base: CollectionTuning) -> CollectionTuning {
        if let Some(threshold) = self.threshold {
            base.threshold = threshold;
        }
        if let Some(weights) = self.weights {
            base.weights = weights;
        }
        base
    }
}

fn deserialize_tuning<'de, D>(
    deserializer: D,
    base: fn() -> CollectionTuning,
) -> std::result::Result<CollectionTuning, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(TuningOverride::deserialize(deserializer)?.apply(base()))
}

fn deserialize_article_tuning<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<CollectionTuning, D::Error> {
    deserialize_tuning(d, default_article_tuning)
}

fn deserialize_author_tuning<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<CollectionTuning, D::Error> {
    deserialize_tuning(d, default_author_tuning)
}

fn deserialize_tag_tuning<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<CollectionTuning, D::Error> {
    deserialize_tuning(d, default_tag_tuning)
}

fn deserialize_category_tuning<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<CollectionTuning, D::Error> {
    deserialize_tuning(d, default_category_tuning)
}

fn deserialize_subcategory_tuning<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<CollectionTuning, D::Error> {
    deserialize_tuning(d, default_subcategory_tuning)
}

/// Search ranker configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Queries shorter than this (trimmed, in chars) return nothing
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Longer queries are cut to this many chars before matching
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Characters from the field start at which a match costs a full point
    #[serde(default = "default_distance")]
    pub distance: usize,

    #[serde(
        default = "default_article_tuning",
        deserialize_with = "deserialize_article_tuning"
    )]
    pub article: CollectionTuning,

    #[serde(
        default = "default_author_tuning",
        deserialize_with = "deserialize_author_tuning"
    )]
    pub author: CollectionTuning,

    #[serde(
        default = "default_tag_tuning",
        deserialize_with = "deserialize_tag_tuning"
    )]
    pub tag: CollectionTuning,

    #[serde(
        default = "default_category_tuning",
        deserialize_with = "deserialize_category_tuning"
    )]
    pub category: CollectionTuning,

    #[serde(
        default = "default_subcategory_tuning",
        deserialize_with = "deserialize_subcategory_tuning"
    )]
    pub subcategory: CollectionTuning,

    /// Per-kind caps for the compact dropdown view
    #[serde(default)]
    pub dropdown: GroupCaps,
}

/// RSS feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_max_items")]
    pub max_items: usize,

    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_sec: u64,

    #[serde(default = "default_stale_while_revalidate")]
    pub stale_while_revalidate_sec: u64,
}

/// A non-entity page listed in the sitemap
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StaticPage {
    /// Site-relative path starting with '/'
    pub path: String,

    #[serde(default)]
    pub changefreq: Option<ChangeFrequency>,

    #[serde(default)]
    pub priority: Option<f32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SitemapConfig {
    #[serde(default = "default_static_pages")]
    pub static_pages: Vec<StaticPage>,
}

/// Newsletter gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsletterConfig {
    /// Subscriber API origin; defaults to the CMS base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Source recorded when the caller does not name one
    #[serde(default = "default_newsletter_source")]
    pub default_source: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_site_url() -> String {
    "https://www.wealthpress.example".to_string()
}

fn default_site_title() -> String {
    "Wealthpress".to_string()
}

fn default_site_description() -> String {
    "Practice management, technology and compliance for wealth advisors".to_string()
}

fn default_language() -> String {
    "en-us".to_string()
}

fn default_source() -> ContentSourceKind {
    ContentSourceKind::Cms
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    500
}

fn default_page_size() -> usize {
    100
}

fn default_min_query_length() -> usize {
    2
}

fn default_max_query_length() -> usize {
    64
}

fn default_distance() -> usize {
    100
}

fn default_article_tuning() -> CollectionTuning {
    CollectionTuning::new(
        0.4,
        &[
            (fields::TITLE, 10.0),
            (fields::EXCERPT, 5.0),
            (fields::SUBTITLE, 4.0),
            (fields::AUTHOR, 3.0),
            (fields::CATEGORY, 2.0),
        ],
    )
}

fn default_author_tuning() -> CollectionTuning {
    CollectionTuning::new(
        0.4,
        &[(fields::NAME, 10.0), (fields::TITLE, 5.0), (fields::BIO, 2.0)],
    )
}

fn default_tag_tuning() -> CollectionTuning {
    CollectionTuning::new(0.3, &[(fields::NAME, 1.0)])
}

fn default_category_tuning() -> CollectionTuning {
    CollectionTuning::new(
        0.4,
        &[
            (fields::NAME, 10.0),
            (fields::SUBTITLE, 5.0),
            (fields::DESCRIPTION, 2.0),
        ],
    )
}

fn default_subcategory_tuning() -> CollectionTuning {
    CollectionTuning::new(0.4, &[(fields::NAME, 10.0), (fields::DESCRIPTION, 5.0)])
}

fn default_feed_max_items() -> usize {
    50
}

fn default_cache_max_age() -> u64 {
    300
}

fn default_stale_while_revalidate() -> u64 {
    3600
}

fn default_static_pages() -> Vec<StaticPage> {
    let page = |path: &str, changefreq, priority| StaticPage {
        path: path.to_string(),
        changefreq: Some(changefreq),
        priority: Some(priority),
    };
    vec![
        page("/", ChangeFrequency::Daily, 1.0),
        page("/articles", ChangeFrequency::Daily, 0.9),
        page("/search", ChangeFrequency::Monthly, 0.3),
        page("/newsletter", ChangeFrequency::Monthly, 0.5),
        page("/about", ChangeFrequency::Monthly, 0.4),
    ]
}

fn default_newsletter_source() -> String {
    "website".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_site_url(),
            title: default_site_title(),
            description: default_site_description(),
            language: default_language(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            base_url: None,
            api_token: None,
            fixture_path: None,
            refresh_interval_sec: default_refresh_interval(),
            request_timeout_sec: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
            page_size: default_page_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            max_query_length: default_max_query_length(),
            distance: default_distance(),
            article: default_article_tuning(),
            author: default_author_tuning(),
            tag: default_tag_tuning(),
            category: default_category_tuning(),
            subcategory: default_subcategory_tuning(),
            dropdown: GroupCaps::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_items: default_feed_max_items(),
            cache_max_age_sec: default_cache_max_age(),
            stale_while_revalidate_sec: default_stale_while_revalidate(),
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            static_pages: default_static_pages(),
        }
    }
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            default_source: default_newsletter_source(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WealthpressError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. WEALTHPRESS_CONFIG env var
    /// 2. XDG config file (~/.config/wealthpress/config.toml)
    /// 3. ./wealthpress.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("WEALTHPRESS_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("wealthpress.toml").exists() {
                Self::from_file("wealthpress.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();

        // Fixture source without an explicit path reads from the data dir
        if config.content.source == ContentSourceKind::Fixture
            && config.content.fixture_path.is_none()
        {
            config.content.fixture_path = Some(xdg.snapshot_file());
        }

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("WEALTHPRESS_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("WEALTHPRESS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Site configuration
        if let Ok(site_url) = env::var("WEALTHPRESS_SITE_URL") {
            self.site.base_url = site_url.trim_end_matches('/').to_string();
        }

        // Content configuration
        if let Ok(source) = env::var("WEALTHPRESS_CONTENT_SOURCE") {
            match source.to_lowercase().as_str() {
                "cms" => self.content.source = ContentSourceKind::Cms,
                "fixture" => self.content.source = ContentSourceKind::Fixture,
                _ => {}
            }
        }
        if let Ok(cms_url) = env::var("WEALTHPRESS_CMS_URL") {
            self.content.base_url = Some(cms_url);
        }
        if let Ok(token) = env::var("WEALTHPRESS_CMS_TOKEN") {
            self.content.api_token = Some(token);
        }
        if let Ok(path) = env::var("WEALTHPRESS_FIXTURE_PATH") {
            self.content.fixture_path = Some(PathBuf::from(path));
        }
        if let Ok(interval) = env::var("WEALTHPRESS_REFRESH_INTERVAL_SEC") {
            if let Ok(i) = interval.parse() {
                self.content.refresh_interval_sec = i;
            }
        }
        if let Ok(retries) = env::var("WEALTHPRESS_MAX_RETRIES") {
            if let Ok(r) = retries.parse() {
                self.content.max_retries = r;
            }
        }

        // Search configuration
        if let Ok(min_len) = env::var("WEALTHPRESS_MIN_QUERY_LENGTH") {
            if let Ok(len) = min_len.parse() {
                self.search.min_query_length = len;
            }
        }
        if let Ok(max_len) = env::var("WEALTHPRESS_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Feed configuration
        if let Ok(max_items) = env::var("WEALTHPRESS_FEED_MAX_ITEMS") {
            if let Ok(n) = max_items.parse() {
                self.feed.max_items = n;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(WealthpressError::ConfigError(
                "Server port must be non-zero".to_string(),
            ));
        }

        // Validate site config
        let site = url::Url::parse(&self.site.base_url).map_err(|e| {
            WealthpressError::ConfigError(format!(
                "Invalid site base URL '{}': {e}",
                self.site.base_url
            ))
        })?;
        if !matches!(site.scheme(), "http" | "https") {
            return Err(WealthpressError::ConfigError(
                "Site base URL must use http or https".to_string(),
            ));
        }

        // Validate content config
        match self.content.source {
            ContentSourceKind::Cms => {
                let base = self.content.base_url.as_deref().ok_or_else(|| {
                    WealthpressError::ConfigError(
                        "CMS content source requires content.base_url".to_string(),
                    )
                })?;
                url::Url::parse(base).map_err(|e| {
                    WealthpressError::ConfigError(format!("Invalid CMS base URL '{base}': {e}"))
                })?;
            }
            ContentSourceKind::Fixture => {
                if self.content.fixture_path.is_none() {
                    return Err(WealthpressError::ConfigError(
                        "Fixture content source requires content.fixture_path".to_string(),
                    ));
                }
            }
        }

        if self.content.refresh_interval_sec == 0 {
            return Err(WealthpressError::ConfigError(
                "Refresh interval must be non-zero".to_string(),
            ));
        }

        if self.content.request_timeout_sec == 0 {
            return Err(WealthpressError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.content.page_size == 0 {
            return Err(WealthpressError::ConfigError(
                "Page size must be non-zero".to_string(),
            ));
        }

        // Validate search config
        if self.search.max_query_length == 0
            || self.search.max_query_length < self.search.min_query_length
        {
            return Err(WealthpressError::ConfigError(format!(
                "Max query length must be at least the min query length ({})",
                self.search.min_query_length
            )));
        }
        self.search
            .article
            .validate("article", fields::ARTICLE_FIELDS)?;
        self.search.author.validate("author", fields::AUTHOR_FIELDS)?;
        self.search.tag.validate("tag", fields::TAG_FIELDS)?;
        self.search
            .category
            .validate("category", fields::CATEGORY_FIELDS)?;
        self.search
            .subcategory
            .validate("subcategory", fields::SUBCATEGORY_FIELDS)?;

        // Validate feed config
        if self.feed.max_items == 0 {
            return Err(WealthpressError::ConfigError(
                "Feed max items must be non-zero".to_string(),
            ));
        }

        // Validate sitemap config
        for page in &self.sitemap.static_pages {
            if !page.path.starts_with('/') {
                return Err(WealthpressError::ConfigError(format!(
                    "Sitemap path '{}' must start with '/'",
                    page.path
                )));
            }
            if let Some(priority) = page.priority {
                if !(0.0..=1.0).contains(&priority) {
                    return Err(WealthpressError::ConfigError(format!(
                        "Sitemap priority for '{}' must be within [0, 1]",
                        page.path
                    )));
                }
            }
        }

        Ok(())
    }

    /// Subscriber API origin, falling back to the CMS origin
    pub fn newsletter_base_url(&self) -> Option<&str> {
        self.newsletter
            .base_url
            .as_deref()
            .or(self.content.base_url.as_deref())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Site: {} ({})", self.site.title, self.site.base_url);
        tracing::info!("  Content source: {:?}", self.content.source);
        match self.content.source {
            ContentSourceKind::Cms => {
                tracing::info!(
                    "  CMS URL: {}",
                    self.content.base_url.as_deref().unwrap_or("<unset>")
                );
                tracing::info!(
                    "  CMS token: {}",
                    if self.content.api_token.is_some() {
                        "<redacted>"
                    } else {
                        "<none>"
                    }
                );
            }
            ContentSourceKind::Fixture => {
                tracing::info!("  Fixture: {:?}", self.content.fixture_path);
            }
        }
        tracing::info!("  Refresh interval: {}s", self.content.refresh_interval_sec);
        tracing::info!(
            "  Retries: {} (base delay {}ms)",
            self.content.max_retries,
            self.content.retry_base_delay_ms
        );
        tracing::info!(
            "  Query length: {}..={} chars",
            self.search.min_query_length,
            self.search.max_query_length
        );
        tracing::info!(
            "  Thresholds: article={} author={} tag={} category={} subcategory={}",
            self.search.article.threshold,
            self.search.author.threshold,
            self.search.tag.threshold,
            self.search.category.threshold,
            self.search.subcategory.threshold
        );
        tracing::info!("  Feed max items: {}", self.feed.max_items);
        tracing::info!(
            "  Feed cache: max-age={}s stale-while-revalidate={}s",
            self.feed.cache_max_age_sec,
            self.feed.stale_while_revalidate_sec
        );
        tracing::info!(
            "  Sitemap static pages: {}",
            self.sitemap.static_pages.len()
        );
    }
}
