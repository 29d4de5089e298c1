// Integration tests for the multi-entity ranker

use std::collections::HashSet;

use crate::common::{find_result, sample_snapshot};
use wealthpress::core::config::SearchConfig;
use wealthpress::core::search::{GroupCaps, GroupedResults, SearchRanker};
use wealthpress::core::types::*;

fn key(r: &SearchResult) -> (EntityKind, String) {
    (r.kind(), r.item.id().to_string())
}

#[test]
fn test_short_queries_return_nothing() {
    let ranker = SearchRanker::default();
    let snapshot = sample_snapshot();

    for q in ["", " ", "c", "  d ", "\t"] {
        assert!(
            ranker.search(q, &snapshot).is_empty(),
            "query {q:?} should yield no results"
        );
    }
}

#[test]
fn test_crm_scenario() {
    let ranker = SearchRanker::default();
    let results = ranker.search("CRM", &sample_snapshot());

    let (article_pos, _) = find_result(&results, EntityKind::Article, "a1").expect("article a1");
    let (tag_pos, _) = find_result(&results, EntityKind::Tag, "t1").expect("tag t1");
    assert!(find_result(&results, EntityKind::Author, "au1").is_none());

    // a2 only matches through its low-weight category name
    let (category_only_pos, _) =
        find_result(&results, EntityKind::Article, "a2").expect("article a2");
    assert!(article_pos < category_only_pos);
    assert!(tag_pos < category_only_pos);
}

#[test]
fn test_exact_title_ranks_first() {
    let ranker = SearchRanker::default();
    let results = ranker.search("The Fiduciary Rule, Explained", &sample_snapshot());

    assert_eq!(key(&results[0]), (EntityKind::Article, "a2".to_string()));
    for other in &results[1..] {
        assert!(results[0].score < other.score);
    }
}

#[test]
fn test_primary_field_beats_low_weight_field() {
    let ranker = SearchRanker::default();
    let results = ranker.search("Fiduciary", &sample_snapshot());

    // exact tag name, then the article title, then the author bio
    assert_eq!(key(&results[0]), (EntityKind::Tag, "t2".to_string()));
    let (title_pos, _) = find_result(&results, EntityKind::Article, "a2").unwrap();
    let (bio_pos, _) = find_result(&results, EntityKind::Author, "au2").unwrap();
    assert!(title_pos < bio_pos);
}

#[test]
fn test_misspelled_author_still_found() {
    let ranker = SearchRanker::default();
    let snapshot = sample_snapshot();

    let exact = ranker.search("Sarah", &snapshot);
    let typo = ranker.search("Sarha", &snapshot);

    let (_, exact_hit) = find_result(&exact, EntityKind::Author, "au2").unwrap();
    let (_, typo_hit) = find_result(&typo, EntityKind::Author, "au2").unwrap();
    assert!(typo_hit.score > exact_hit.score);
}

#[test]
fn test_search_is_idempotent() {
    let ranker = SearchRanker::default();
    let snapshot = sample_snapshot();

    for q in ["CRM", "data", "compliance", "Sarha"] {
        assert_eq!(ranker.search(q, &snapshot), ranker.search(q, &snapshot));
    }
}

#[test]
fn test_every_match_appears_once() {
    let ranker = SearchRanker::default();
    let results = ranker.search("data", &sample_snapshot());

    let keys: Vec<_> = results.iter().map(key).collect();
    let unique: HashSet<_> = keys.iter().cloned().collect();
    assert_eq!(keys.len(), unique.len(), "duplicate results: {keys:?}");

    for (kind, id) in [
        (EntityKind::Article, "a1"),
        (EntityKind::Article, "a3"),
        (EntityKind::Tag, "t3"),
        (EntityKind::Subcategory, "s1"),
    ] {
        assert!(find_result(&results, kind, id).is_some(), "missing {kind} {id}");
    }
}

#[test]
fn test_identical_records_both_returned() {
    let ranker = SearchRanker::default();
    let mut snapshot = sample_snapshot();
    let mut twin = snapshot.tags[0].clone();
    twin.id = "t9".to_string();
    snapshot.tags.push(twin);

    let results = ranker.search("CRM Systems", &snapshot);
    let (first, a) = find_result(&results, EntityKind::Tag, "t1").unwrap();
    let (second, b) = find_result(&results, EntityKind::Tag, "t9").unwrap();
    assert_eq!(a.score, b.score);
    // Stable sort keeps snapshot order for ties
    assert!(first < second);
}

#[test]
fn test_empty_snapshot() {
    let ranker = SearchRanker::default();
    assert!(ranker.search("CRM", &ContentSnapshot::default()).is_empty());
}

#[test]
fn test_grouping_preserves_multiset() {
    let ranker = SearchRanker::default();
    let snapshot = sample_snapshot();

    for q in ["CRM", "data", "compliance", "advisors"] {
        let results = ranker.search(q, &snapshot);
        let regrouped = GroupedResults::from_results(results.clone()).into_results();

        let mut before: Vec<_> = results.iter().map(key).collect();
        let mut after: Vec<_> = regrouped.iter().map(key).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after, "query {q:?}");
    }
}

#[test]
fn test_grouped_keeps_rank_order_within_kind() {
    let ranker = SearchRanker::default();
    let results = ranker.search("data", &sample_snapshot());
    let grouped = GroupedResults::from_results(results);

    for kind in EntityKind::ALL {
        for pair in grouped.group(kind).windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }
}

#[test]
fn test_dropdown_caps() {
    let ranker = SearchRanker::default();
    let results = ranker.search("data", &sample_snapshot());
    let caps = GroupCaps {
        articles: 1,
        ..GroupCaps::default()
    };

    let grouped = GroupedResults::from_results(results).capped(&caps);
    assert_eq!(grouped.articles.len(), 1);
}

#[test]
fn test_stricter_tag_threshold() {
    let snapshot = sample_snapshot();
    let mut config = SearchConfig::default();

    // One substitution in "fiduciery" is 0.111 away; a 0.05 threshold rejects it
    config.tag.threshold = 0.05;
    let strict = SearchRanker::new(&config);
    let loose = SearchRanker::default();

    assert!(find_result(&loose.search("fiduciery", &snapshot), EntityKind::Tag, "t2").is_some());
    assert!(find_result(&strict.search("fiduciery", &snapshot), EntityKind::Tag, "t2").is_none());
}
