//! Presentation grouping for ranked results.
//!
//! Splits a merged ranking back out by entity kind and applies per-kind
//! display caps. Ranking itself is never affected.

use crate::core::types::{ContentCounts, EntityKind, SearchResult};
use serde::{Deserialize, Serialize};

/// Maximum results shown per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCaps {
    #[serde(default = "default_article_cap")]
    pub articles: usize,
    #[serde(default = "default_small_cap")]
    pub authors: usize,
    #[serde(default = "default_small_cap")]
    pub tags: usize,
    #[serde(default = "default_small_cap")]
    pub categories: usize,
    #[serde(default = "default_small_cap")]
    pub subcategories: usize,
}

fn default_article_cap() -> usize {
    5
}

fn default_small_cap() -> usize {
    3
}

impl Default for GroupCaps {
    /// Compact dropdown caps
    fn default() -> Self {
        Self {
            articles: default_article_cap(),
            authors: default_small_cap(),
            tags: default_small_cap(),
            categories: default_small_cap(),
            subcategories: default_small_cap(),
        }
    }
}

impl GroupCaps {
    /// No caps (dedicated results page)
    pub fn unlimited() -> Self {
        Self {
            articles: usize::MAX,
            authors: usize::MAX,
            tags: usize::MAX,
            categories: usize::MAX,
            subcategories: usize::MAX,
        }
    }

    pub fn for_kind(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Article => self.articles,
            EntityKind::Author => self.authors,
            EntityKind::Tag => self.tags,
            EntityKind::Category => self.categories,
            EntityKind::Subcategory => self.subcategories,
        }
    }
}

/// Ranked results partitioned by kind, rank order kept within each group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedResults {
    pub articles: Vec<SearchResult>,
    pub authors: Vec<SearchResult>,
    pub tags: Vec<SearchResult>,
    pub categories: Vec<SearchResult>,
    pub subcategories: Vec<SearchResult>,
}

impl GroupedResults {
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        let mut grouped = Self::default();
        for result in results {
            grouped.group_mut(result.kind()).push(result);
        }
        grouped
    }

    pub fn group(&self, kind: EntityKind) -> &[SearchResult] {
        match kind {
            EntityKind::Article => &self.articles,
            EntityKind::Author => &self.authors,
            EntityKind::Tag => &self.tags,
            EntityKind::Category => &self.categories,
            EntityKind::Subcategory => &self.subcategories,
        }
    }

    fn group_mut(&mut self, kind: EntityKind) -> &mut Vec<SearchResult> {
        match kind {
            EntityKind::Article => &mut self.articles,
            EntityKind::Author => &mut self.authors,
            EntityKind::Tag => &mut self.tags,
            EntityKind::Category => &mut self.categories,
            EntityKind::Subcategory => &mut self.subcategories,
        }
    }

    /// Truncate every group to its cap
    pub fn capped(mut self, caps: &GroupCaps) -> Self {
        for kind in EntityKind::ALL {
            self.group_mut(kind).truncate(caps.for_kind(kind));
        }
        self
    }

    /// Per-kind result counts
    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            articles: self.articles.len(),
            authors: self.authors.len(),
            categories: self.categories.len(),
            subcategories: self.subcategories.len(),
            tags: self.tags.len(),
        }
    }

    pub fn len(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.group(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate the groups in kind order
    pub fn into_results(self) -> Vec<SearchResult> {
        let mut results = Vec::with_capacity(self.len());
        results.extend(self.articles);
        results.extend(self.authors);
        results.extend(self.tags);
        results.extend(self.categories);
        results.extend(self.subcategories);
        results
    }
}
