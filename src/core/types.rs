//! Core data types for the Wealthpress content service.
//!
//! This module defines the content entities loaded from the CMS, the
//! immutable snapshot that groups them, and the derived search result
//! types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    /// Owning category (exactly one)
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    /// Owning author (exactly one)
    pub author_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Last modification time, falling back to the publish date
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.published_at)
    }
}

/// An author profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Professional title, e.g. "Senior Compliance Editor"
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Back-reference to the owning category
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub slug: String,
    pub name: String,
}

/// The five entity kinds the site addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Article,
    Author,
    Tag,
    Category,
    Subcategory,
}

impl EntityKind {
    /// All kinds, in merge order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Article,
        EntityKind::Author,
        EntityKind::Tag,
        EntityKind::Category,
        EntityKind::Subcategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Article => "article",
            EntityKind::Author => "author",
            EntityKind::Tag => "tag",
            EntityKind::Category => "category",
            EntityKind::Subcategory => "subcategory",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference from one entity to another that does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Kind of the entity holding the reference
    pub from_kind: EntityKind,
    pub from_id: String,
    /// Kind the reference should point to
    pub to_kind: EntityKind,
    pub to_id: String,
}

/// Immutable copy of all site content at one point in time
///
/// Built once per fetch; shared read-only (behind `Arc`) with every
/// consumer until the next refresh replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ContentSnapshot {
    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn author_by_slug(&self, slug: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.slug == slug)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn subcategory_by_slug(&self, slug: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.slug == slug)
    }

    pub fn tag_by_slug(&self, slug: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.slug == slug)
    }

    /// Index authors by id for repeated lookups
    pub fn author_index(&self) -> HashMap<&str, &Author> {
        self.authors.iter().map(|a| (a.id.as_str(), a)).collect()
    }

    /// Index categories by id for repeated lookups
    pub fn category_index(&self) -> HashMap<&str, &Category> {
        self.categories.iter().map(|c| (c.id.as_str(), c)).collect()
    }

    /// Total number of records across all collections
    pub fn total_records(&self) -> usize {
        self.articles.len()
            + self.authors.len()
            + self.categories.len()
            + self.subcategories.len()
            + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }

    /// Find references that do not resolve within this snapshot
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let authors = self.author_index();
        let categories = self.category_index();
        let mut dangling = Vec::new();

        let mut missing = |from_kind, from_id: &str, to_kind, to_id: &str| {
            dangling.push(DanglingReference {
                from_kind,
                from_id: from_id.to_string(),
                to_kind,
                to_id: to_id.to_string(),
            });
        };

        for article in &self.articles {
            if !authors.contains_key(article.author_id.as_str()) {
                missing(
                    EntityKind::Article,
                    &article.id,
                    EntityKind::Author,
                    &article.author_id,
                );
            }
            if !categories.contains_key(article.category_id.as_str()) {
                missing(
                    EntityKind::Article,
                    &article.id,
                    EntityKind::Category,
                    &article.category_id,
                );
            }
            if let Some(sub_id) = &article.subcategory_id {
                if self.subcategory(sub_id).is_none() {
                    missing(
                        EntityKind::Article,
                        &article.id,
                        EntityKind::Subcategory,
                        sub_id,
                    );
                }
            }
            for tag_id in &article.tag_ids {
                if self.tag(tag_id).is_none() {
                    missing(EntityKind::Article, &article.id, EntityKind::Tag, tag_id);
                }
            }
        }

        for sub in &self.subcategories {
            if !categories.contains_key(sub.category_id.as_str()) {
                missing(
                    EntityKind::Subcategory,
                    &sub.id,
                    EntityKind::Category,
                    &sub.category_id,
                );
            }
        }

        dangling
    }
}

/// The matched entity carried by a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "lowercase")]
pub enum SearchItem {
    Article(Article),
    Author(Author),
    Tag(Tag),
    Category(Category),
    Subcategory(Subcategory),
}

impl SearchItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            SearchItem::Article(_) => EntityKind::Article,
            SearchItem::Author(_) => EntityKind::Author,
            SearchItem::Tag(_) => EntityKind::Tag,
            SearchItem::Category(_) => EntityKind::Category,
            SearchItem::Subcategory(_) => EntityKind::Subcategory,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SearchItem::Article(a) => &a.id,
            SearchItem::Author(a) => &a.id,
            SearchItem::Tag(t) => &t.id,
            SearchItem::Category(c) => &c.id,
            SearchItem::Subcategory(s) => &s.id,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            SearchItem::Article(a) => &a.slug,
            SearchItem::Author(a) => &a.slug,
            SearchItem::Tag(t) => &t.slug,
            SearchItem::Category(c) => &c.slug,
            SearchItem::Subcategory(s) => &s.slug,
        }
    }

    /// Primary display label (title for articles, name otherwise)
    pub fn label(&self) -> &str {
        match self {
            SearchItem::Article(a) => &a.title,
            SearchItem::Author(a) => &a.name,
            SearchItem::Tag(t) => &t.name,
            SearchItem::Category(c) => &c.name,
            SearchItem::Subcategory(s) => &s.name,
        }
    }
}

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Distance in [0, 1] (lower = better, 0 = perfect)
    pub score: f64,

    #[serde(flatten)]
    pub item: SearchItem,
}

impl SearchResult {
    pub fn kind(&self) -> EntityKind {
        self.item.kind()
    }
}

/// Response from a flat search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Ranked results, best first
    pub results: Vec<SearchResult>,

    /// Number of results returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Records per collection in the current snapshot
    pub content: ContentCounts,

    /// When the current snapshot was fetched (RFC 3339)
    pub fetched_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub articles: usize,
    pub authors: usize,
    pub categories: usize,
    pub subcategories: usize,
    pub tags: usize,
}

impl ContentCounts {
    pub fn get(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Article => self.articles,
            EntityKind::Author => self.authors,
            EntityKind::Tag => self.tags,
            EntityKind::Category => self.categories,
            EntityKind::Subcategory => self.subcategories,
        }
    }
}

impl From<&ContentSnapshot> for ContentCounts {
    fn from(snapshot: &ContentSnapshot) -> Self {
        Self {
            articles: snapshot.articles.len(),
            authors: snapshot.authors.len(),
            categories: snapshot.categories.len(),
            subcategories: snapshot.subcategories.len(),
            tags: snapshot.tags.len(),
        }
    }
}

/// Newsletter subscribe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,

    /// Where the signup happened (e.g. "footer"); defaults from config
    #[serde(default)]
    pub source: Option<String>,
}

/// Newsletter unsubscribe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,

    #[serde(default)]
    pub reason: Option<String>,
}

/// Result of a subscribe/unsubscribe call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// "subscribed", "already_subscribed", "unsubscribed" or "not_found"
    pub status: String,

    /// Normalised address
    pub email: String,
}
