//! Content sources.

use crate::core::error::{Result, WealthpressError};
use crate::core::types::ContentSnapshot;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Something that can produce a complete content snapshot
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Fetch all five collections
    async fn fetch_snapshot(&self) -> Result<ContentSnapshot>;
}

/// Snapshot stored as a single JSON document on disk
///
/// Shape: `{"articles": [...], "authors": [...], "categories": [...],
/// "subcategories": [...], "tags": [...]}` using the CMS field names.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_snapshot(&self) -> Result<ContentSnapshot> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            WealthpressError::ContentFetch(format!(
                "Failed to read fixture {:?}: {e}",
                self.path
            ))
        })?;

        let mut snapshot: ContentSnapshot = serde_json::from_str(&contents)?;
        snapshot.fetched_at = Some(Utc::now());
        Ok(snapshot)
    }
}
