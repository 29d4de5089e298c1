//! Current-snapshot holder.
//!
//! Readers clone the `Arc` and drop the lock immediately; a refresh
//! builds the new snapshot off-lock and swaps the pointer. A failed
//! refresh keeps serving the previous snapshot.

use super::source::ContentSource;
use crate::core::error::Result;
use crate::core::types::ContentSnapshot;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

pub struct ContentStore {
    source: Arc<dyn ContentSource>,
    current: RwLock<Arc<ContentSnapshot>>,
}

impl ContentStore {
    /// Create a store with an empty snapshot
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_snapshot(source, ContentSnapshot::default())
    }

    pub fn with_snapshot(source: Arc<dyn ContentSource>, snapshot: ContentSnapshot) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Latest snapshot
    pub fn current(&self) -> Arc<ContentSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new snapshot
    pub fn replace(&self, snapshot: ContentSnapshot) -> Arc<ContentSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&snapshot);
        snapshot
    }

    /// Fetch from the source and swap on success
    pub async fn refresh(&self) -> Result<Arc<ContentSnapshot>> {
        let snapshot = self.source.fetch_snapshot().await?;

        let dangling = snapshot.dangling_references();
        if !dangling.is_empty() {
            warn!(
                count = dangling.len(),
                "Snapshot has unresolved references; affected fields are skipped"
            );
            for d in dangling.iter().take(10) {
                warn!(
                    "  {} {} -> missing {} {}",
                    d.from_kind, d.from_id, d.to_kind, d.to_id
                );
            }
        }

        info!(
            source = self.source.name(),
            articles = snapshot.articles.len(),
            authors = snapshot.authors.len(),
            categories = snapshot.categories.len(),
            subcategories = snapshot.subcategories.len(),
            tags = snapshot.tags.len(),
            "Content snapshot refreshed"
        );

        Ok(self.replace(snapshot))
    }

    /// Refresh every `interval` until the task is aborted
    ///
    /// The first refresh happens one interval after spawning; call
    /// [`refresh`](Self::refresh) beforehand for an initial load.
    pub fn spawn_refresher(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = store.refresh().await {
                    error!(error = %e, "Content refresh failed; keeping previous snapshot");
                }
            }
        })
    }
}
