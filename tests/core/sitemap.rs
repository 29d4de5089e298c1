// Integration tests for sitemap generation over the sample snapshot

use crate::common::sample_snapshot;
use chrono::NaiveDate;
use wealthpress::core::config::{SiteConfig, SitemapConfig};
use wealthpress::core::sitemap::{ChangeFrequency, SitemapGenerator};

fn generator() -> SitemapGenerator {
    let site = SiteConfig {
        base_url: "https://www.example.test".to_string(),
        ..SiteConfig::default()
    };
    SitemapGenerator::new(&site, &SitemapConfig::default())
}

#[test]
fn test_every_entity_listed_once() {
    let entries = generator().entries(&sample_snapshot());
    // 5 static pages + 3 articles + 2 categories + 2 subcategories + 2 authors + 3 tags
    assert_eq!(entries.len(), 17);

    let mut locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
    locs.sort();
    locs.dedup();
    assert_eq!(locs.len(), 17);
}

#[test]
fn test_article_entry() {
    let entries = generator().entries(&sample_snapshot());
    let entry = entries
        .iter()
        .find(|e| e.loc == "https://www.example.test/articles/fiduciary-rule-explained")
        .unwrap();

    // updated_at wins over published_at
    assert_eq!(entry.lastmod, NaiveDate::from_ymd_opt(2025, 4, 5));
    assert_eq!(entry.changefreq, Some(ChangeFrequency::Weekly));
    assert_eq!(entry.priority, Some(0.8));
}

#[test]
fn test_author_lastmod_is_newest_article() {
    let entries = generator().entries(&sample_snapshot());
    let entry = entries
        .iter()
        .find(|e| e.loc.ends_with("/authors/david-chen"))
        .unwrap();

    assert_eq!(entry.lastmod, NaiveDate::from_ymd_opt(2025, 3, 10));
    assert_eq!(entry.changefreq, Some(ChangeFrequency::Monthly));
}

#[test]
fn test_tags_and_subcategories_have_no_lastmod() {
    let entries = generator().entries(&sample_snapshot());
    for entry in entries
        .iter()
        .filter(|e| e.loc.contains("/tags/") || e.loc.matches('/').count() > 4)
    {
        assert!(entry.lastmod.is_none(), "{} has lastmod", entry.loc);
    }
}

#[test]
fn test_rendered_document() {
    let xml = generator().render(&sample_snapshot());

    assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
    assert_eq!(xml.matches("<url>").count(), 17);
    assert!(xml.contains("<loc>https://www.example.test/categories/technology/cybersecurity</loc>"));
    assert!(xml.contains("<priority>0.4</priority>"));
}
