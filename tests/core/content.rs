// Integration tests for content sources and the snapshot store

use std::sync::Arc;
use std::time::Duration;

use crate::common::{sample_snapshot, FixtureFile};
use mockito::Matcher;
use serde_json::json;
use wealthpress::core::content::{
    CmsClient, ContentSource, ContentStore, FixtureSource, RetryPolicy,
};
use wealthpress::core::error::WealthpressError;

#[tokio::test]
async fn test_fixture_roundtrip_through_store() {
    let fixture = FixtureFile::new(&sample_snapshot());
    let store = ContentStore::new(Arc::new(FixtureSource::new(fixture.path())));

    let snapshot = store.refresh().await.unwrap();
    assert_eq!(snapshot.articles.len(), 3);
    assert_eq!(snapshot.tags.len(), 3);
    assert!(snapshot.fetched_at.is_some());
    assert!(snapshot.dangling_references().is_empty());
}

#[tokio::test]
async fn test_refresh_picks_up_edits() {
    let mut snapshot = sample_snapshot();
    let fixture = FixtureFile::new(&snapshot);
    let store = ContentStore::new(Arc::new(FixtureSource::new(fixture.path())));
    store.refresh().await.unwrap();

    snapshot.tags.pop();
    fixture.write(&snapshot);
    store.refresh().await.unwrap();

    assert_eq!(store.current().tags.len(), 2);
}

#[tokio::test]
async fn test_corrupt_fixture_keeps_previous_snapshot() {
    let fixture = FixtureFile::new(&sample_snapshot());
    let store = ContentStore::new(Arc::new(FixtureSource::new(fixture.path())));
    store.refresh().await.unwrap();

    fixture.corrupt();
    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, WealthpressError::SerdeError(_)));
    assert_eq!(store.current().articles.len(), 3);
}

#[tokio::test]
async fn test_missing_fixture_is_fetch_error() {
    let source = FixtureSource::new("/nonexistent/snapshot.json");
    let err = source.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WealthpressError::ContentFetch(_)));
}

fn page_query(page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("pagination[page]".into(), page.into()),
        Matcher::UrlEncoded("pagination[pageSize]".into(), "2".into()),
    ])
}

fn client(url: &str) -> CmsClient {
    CmsClient::new(url, Some("cms-token".to_string()), Duration::from_secs(5))
        .unwrap()
        .with_page_size(2)
        .with_retry(RetryPolicy::new(2, Duration::from_millis(1)))
}

#[tokio::test]
async fn test_cms_snapshot_follows_pagination() {
    let mut server = mockito::Server::new_async().await;

    let article = |id: &str| {
        json!({
            "id": id,
            "slug": format!("article-{id}"),
            "title": format!("Article {id}"),
            "excerpt": "",
            "categoryId": "c1",
            "authorId": "au1",
            "publishedAt": "2025-03-01T09:00:00Z"
        })
    };

    let page1 = server
        .mock("GET", "/api/articles")
        .match_query(page_query("1"))
        .match_header("authorization", "Bearer cms-token")
        .with_status(200)
        .with_body(
            json!({
                "data": [article("1"), article("2")],
                "meta": {"pagination": {"page": 1, "pageCount": 2}}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/api/articles")
        .match_query(page_query("2"))
        .with_status(200)
        .with_body(
            json!({
                "data": [article("3")],
                "meta": {"pagination": {"page": 2, "pageCount": 2}}
            })
            .to_string(),
        )
        .create_async()
        .await;

    server
        .mock("GET", "/api/authors")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"data": [{"id": "au1", "slug": "david-chen", "name": "David Chen"}]})
                .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/categories")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"data": [{"id": "c1", "slug": "technology", "name": "Technology"}]})
                .to_string(),
        )
        .create_async()
        .await;
    for collection in ["subcategories", "tags"] {
        server
            .mock("GET", format!("/api/{collection}").as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;
    }

    let snapshot = client(&server.url()).fetch_snapshot().await.unwrap();

    page1.assert_async().await;
    page2.assert_async().await;
    assert_eq!(snapshot.articles.len(), 3);
    assert_eq!(snapshot.articles[2].id, "3");
    assert_eq!(snapshot.authors[0].name, "David Chen");
    assert!(snapshot.tags.is_empty());
    assert!(snapshot.dangling_references().is_empty());
}

#[tokio::test]
async fn test_cms_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let not_found = server
        .mock("GET", "/api/tags")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("no such collection")
        .expect(1)
        .create_async()
        .await;

    let err = client(&server.url())
        .fetch_collection::<serde_json::Value>("tags")
        .await
        .unwrap_err();

    not_found.assert_async().await;
    match err {
        WealthpressError::Upstream { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cms_server_error_retried_until_exhausted() {
    let mut server = mockito::Server::new_async().await;
    // First attempt plus two retries
    let unavailable = server
        .mock("GET", "/api/tags")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let err = client(&server.url())
        .fetch_collection::<serde_json::Value>("tags")
        .await
        .unwrap_err();

    unavailable.assert_async().await;
    assert!(err.is_retryable());
}
