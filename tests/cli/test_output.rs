// Tests for CLI output helpers

use std::time::Duration;
use wealthpress::cli::output::{format_elapsed, group_heading, truncate};
use wealthpress::core::types::EntityKind;

#[test]
fn test_format_elapsed_units() {
    assert_eq!(format_elapsed(Duration::ZERO), "0µs");
    assert_eq!(format_elapsed(Duration::from_millis(12)), "12.0ms");
}

#[test]
fn test_group_headings_cover_every_kind() {
    let headings: Vec<&str> = EntityKind::ALL.iter().map(|k| group_heading(*k)).collect();
    assert_eq!(
        headings,
        vec!["Articles", "Authors", "Tags", "Categories", "Subcategories"]
    );
}

#[test]
fn test_truncate_long_titles() {
    let title = "CRM Platforms Compared: What Advisors Actually Use";
    let short = truncate(title, 20);
    assert_eq!(short.chars().count(), 20);
    assert!(short.ends_with("..."));
}
