//! Headless CMS REST client.
//!
//! Every collection lives at `{base}/api/{collection}` and is paged:
//!
//! ```text
//! GET /api/articles?pagination[page]=1&pagination[pageSize]=100
//! {"data": [...], "meta": {"pagination": {"page": 1, "pageCount": 3}}}
//! ```
//!
//! A response without `meta.pagination` is treated as the only page.

use super::retry::{retry_with_backoff, RetryPolicy};
use super::source::ContentSource;
use crate::core::config::ContentConfig;
use crate::core::error::{Result, WealthpressError};
use crate::core::types::{Article, Author, Category, ContentSnapshot, Subcategory, Tag};
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound on pages per collection
const MAX_PAGES: usize = 1000;

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: usize,
    page_count: usize,
}

/// Read-only client for the content collections
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    page_size: usize,
    retry: RetryPolicy,
}

impl CmsClient {
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            WealthpressError::ConfigError(format!("Invalid CMS base URL '{base_url}': {e}"))
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wealthpress/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            page_size: 100,
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            WealthpressError::ConfigError("content.base_url is not set".to_string())
        })?;

        Ok(Self::new(
            base_url,
            config.api_token.clone(),
            Duration::from_secs(config.request_timeout_sec),
        )?
        .with_page_size(config.page_size)
        .with_retry(RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
        )))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every page of one collection
    pub async fn fetch_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let what = format!("{collection} page {page}");
            let batch: Page<T> =
                retry_with_backoff(self.retry, &what, || self.fetch_page(collection, page)).await?;

            let page_count = batch
                .meta
                .and_then(|m| m.pagination)
                .map(|p| p.page_count.max(p.page))
                .unwrap_or(page);

            debug!(
                collection,
                page,
                page_count,
                records = batch.data.len(),
                "Fetched CMS page"
            );
            records.extend(batch.data);

            if page >= page_count || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, collection: &str, page: usize) -> Result<Page<T>> {
        let url = format!("{}/api/{collection}", self.base_url);
        let mut request = self.http.get(&url).query(&[
            ("pagination[page]", page.to_string()),
            ("pagination[pageSize]", self.page_size.to_string()),
        ]);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WealthpressError::Upstream {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        Ok(response.json::<Page<T>>().await?)
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    fn name(&self) -> &str {
        "cms"
    }

    async fn fetch_snapshot(&self) -> Result<ContentSnapshot> {
        let start = Instant::now();

        let (articles, authors, categories, subcategories, tags) = tokio::try_join!(
            self.fetch_collection::<Article>("articles"),
            self.fetch_collection::<Author>("authors"),
            self.fetch_collection::<Category>("categories"),
            self.fetch_collection::<Subcategory>("subcategories"),
            self.fetch_collection::<Tag>("tags"),
        )?;

        let snapshot = ContentSnapshot {
            articles,
            authors,
            categories,
            subcategories,
            tags,
            fetched_at: Some(Utc::now()),
        };

        info!(
            records = snapshot.total_records(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched content snapshot from CMS"
        );

        Ok(snapshot)
    }
}

/// Cut `s` to at most `max` chars for error messages
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
