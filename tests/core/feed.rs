// Integration tests for RSS generation over the sample snapshot

use crate::common::sample_snapshot;
use chrono::{TimeZone, Utc};
use wealthpress::core::config::{FeedConfig, SiteConfig};
use wealthpress::core::feed::{FeedGenerator, FeedScope};

fn generator() -> FeedGenerator {
    let site = SiteConfig {
        base_url: "https://www.example.test".to_string(),
        ..SiteConfig::default()
    };
    FeedGenerator::new(&site, &FeedConfig::default())
}

#[test]
fn test_site_feed_lists_every_article_newest_first() {
    let xml = generator()
        .render(&sample_snapshot(), &FeedScope::All)
        .unwrap();

    assert_eq!(xml.matches("<item>").count(), 3);
    let fiduciary = xml.find("The Fiduciary Rule, Explained").unwrap();
    let crm = xml.find("CRM Platforms Compared").unwrap();
    let data = xml.find("Protecting Client Data").unwrap();
    assert!(fiduciary < crm && crm < data);

    assert!(xml.contains(
        r#"<atom:link href="https://www.example.test/feed.xml" rel="self" type="application/rss+xml"/>"#
    ));
    assert!(xml.contains("<language>en-us</language>"));
    // Newest change is the update on a2
    let updated = Utc.with_ymd_and_hms(2025, 4, 5, 9, 0, 0).unwrap();
    assert!(xml.contains(&format!(
        "<lastBuildDate>{}</lastBuildDate>",
        updated.to_rfc2822()
    )));
}

#[test]
fn test_category_feed() {
    let xml = generator()
        .render(&sample_snapshot(), &FeedScope::Category("technology".to_string()))
        .unwrap();

    assert_eq!(xml.matches("<item>").count(), 2);
    assert!(xml.contains("<title>Wealthpress - Technology</title>"));
    assert!(xml.contains("<link>https://www.example.test/categories/technology</link>"));
    assert!(!xml.contains("Fiduciary Rule"));
}

#[test]
fn test_subcategory_feed_links_nested_page() {
    let xml = generator()
        .render(&sample_snapshot(), &FeedScope::Subcategory("sec-rules".to_string()))
        .unwrap();

    assert_eq!(xml.matches("<item>").count(), 1);
    assert!(xml.contains("<link>https://www.example.test/categories/compliance/sec-rules</link>"));
}

#[test]
fn test_author_feed_items_carry_metadata() {
    let xml = generator()
        .render(&sample_snapshot(), &FeedScope::Author("david-chen".to_string()))
        .unwrap();

    assert_eq!(xml.matches("<item>").count(), 2);
    assert_eq!(xml.matches("<dc:creator>David Chen</dc:creator>").count(), 2);
    assert!(xml.contains("<category>CRM Systems</category>"));
    assert!(xml.contains("<category>Cybersecurity</category>"));
    assert!(xml.contains("<description>Survey data on adoption across independent firms</description>"));
}

#[test]
fn test_unknown_scopes_are_not_found() {
    let snapshot = sample_snapshot();
    for scope in [
        FeedScope::Category("nope".to_string()),
        FeedScope::Subcategory("nope".to_string()),
        FeedScope::Author("nope".to_string()),
        FeedScope::Tag("nope".to_string()),
    ] {
        let err = generator().render(&snapshot, &scope).unwrap_err();
        assert!(err.is_not_found(), "{scope} should be not found");
    }
}
