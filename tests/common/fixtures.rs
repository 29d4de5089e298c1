// Test fixtures for integration testing

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wealthpress::core::types::*;

#[allow(dead_code)] // Used in integration tests
fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

/// Small but complete publication
///
/// - a1 "CRM Platforms Compared..." by David Chen, tag "CRM Systems"
/// - a2 "The Fiduciary Rule, Explained" by Sarah Mitchell (updated)
/// - a3 "Protecting Client Data in a Hybrid Office" by David Chen
#[allow(dead_code)] // Used in integration tests
pub fn sample_snapshot() -> ContentSnapshot {
    ContentSnapshot {
        articles: vec![
            Article {
                id: "a1".to_string(),
                slug: "crm-platforms-compared".to_string(),
                title: "CRM Platforms Compared: What Advisors Actually Use".to_string(),
                subtitle: None,
                excerpt: "Survey data on adoption across independent firms".to_string(),
                category_id: "c1".to_string(),
                subcategory_id: None,
                author_id: "au1".to_string(),
                tag_ids: vec!["t1".to_string()],
                published_at: at(2025, 3, 10),
                updated_at: None,
            },
            Article {
                id: "a2".to_string(),
                slug: "fiduciary-rule-explained".to_string(),
                title: "The Fiduciary Rule, Explained".to_string(),
                subtitle: Some("What changes for fee-only advisors".to_string()),
                excerpt: "What the latest guidance means for your practice".to_string(),
                category_id: "c2".to_string(),
                subcategory_id: Some("s2".to_string()),
                author_id: "au2".to_string(),
                tag_ids: vec!["t2".to_string()],
                published_at: at(2025, 4, 2),
                updated_at: Some(at(2025, 4, 5)),
            },
            Article {
                id: "a3".to_string(),
                slug: "protecting-client-data".to_string(),
                title: "Protecting Client Data in a Hybrid Office".to_string(),
                subtitle: None,
                excerpt: "Practical steps for securing remote work".to_string(),
                category_id: "c1".to_string(),
                subcategory_id: Some("s1".to_string()),
                author_id: "au1".to_string(),
                tag_ids: vec!["t3".to_string()],
                published_at: at(2025, 2, 14),
                updated_at: None,
            },
        ],
        authors: vec![
            Author {
                id: "au1".to_string(),
                slug: "david-chen".to_string(),
                name: "David Chen".to_string(),
                title: "Senior Technology Analyst".to_string(),
                bio: "David covers portfolio analytics and client reporting.".to_string(),
            },
            Author {
                id: "au2".to_string(),
                slug: "sarah-mitchell".to_string(),
                name: "Sarah Mitchell".to_string(),
                title: "Compliance Editor".to_string(),
                bio: "Sarah writes about fiduciary duty and regulatory change.".to_string(),
            },
        ],
        categories: vec![
            Category {
                id: "c1".to_string(),
                slug: "technology".to_string(),
                name: "Technology".to_string(),
                subtitle: "Tools for the modern practice".to_string(),
                description: "Software and platforms advisors depend on".to_string(),
            },
            Category {
                id: "c2".to_string(),
                slug: "compliance".to_string(),
                name: "Compliance".to_string(),
                subtitle: "Regulation without the jargon".to_string(),
                description: "SEC and FINRA rules explained for RIAs".to_string(),
            },
        ],
        subcategories: vec![
            Subcategory {
                id: "s1".to_string(),
                slug: "cybersecurity".to_string(),
                name: "Cybersecurity".to_string(),
                description: "Protecting client data".to_string(),
                category_id: "c1".to_string(),
            },
            Subcategory {
                id: "s2".to_string(),
                slug: "sec-rules".to_string(),
                name: "SEC Rules".to_string(),
                description: "Rulemaking and enforcement updates".to_string(),
                category_id: "c2".to_string(),
            },
        ],
        tags: vec![
            Tag {
                id: "t1".to_string(),
                slug: "crm-systems".to_string(),
                name: "CRM Systems".to_string(),
            },
            Tag {
                id: "t2".to_string(),
                slug: "fiduciary".to_string(),
                name: "Fiduciary".to_string(),
            },
            Tag {
                id: "t3".to_string(),
                slug: "data-privacy".to_string(),
                name: "Data Privacy".to_string(),
            },
        ],
        fetched_at: None,
    }
}

/// Snapshot written to a temporary JSON file
#[allow(dead_code)] // Used in integration tests
pub struct FixtureFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl FixtureFile {
    #[allow(dead_code)] // Used in integration tests
    pub fn new(snapshot: &ContentSnapshot) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("snapshot.json");
        let fixture = Self { dir, path };
        fixture.write(snapshot);
        fixture
    }

    /// Overwrite the fixture (simulates a CMS edit)
    #[allow(dead_code)] // Used in integration tests
    pub fn write(&self, snapshot: &ContentSnapshot) {
        let json = serde_json::to_string_pretty(snapshot).expect("Failed to serialize snapshot");
        std::fs::write(&self.path, json).expect("Failed to write fixture");
    }

    /// Replace the fixture with invalid JSON
    #[allow(dead_code)] // Used in integration tests
    pub fn corrupt(&self) {
        std::fs::write(&self.path, "{ not json").expect("Failed to write fixture");
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        &self.path
    }
}
