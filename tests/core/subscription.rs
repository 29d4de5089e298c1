// Integration tests for the newsletter gateway against a mock CMS

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use wealthpress::core::error::WealthpressError;
use wealthpress::core::subscription::{
    validate_email, NewsletterGateway, SubscribeOutcome, UnsubscribeOutcome,
};

fn gateway(url: &str) -> NewsletterGateway {
    NewsletterGateway::new(url, None, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_validate_email() {
    assert_eq!(validate_email(" Advisor@Firm.COM").unwrap(), "advisor@firm.com");
    assert!(validate_email("advisor@firm").is_err());
    assert!(validate_email("advisor firm.com").is_err());
}

#[tokio::test]
async fn test_subscribe_then_already_subscribed() {
    let mut server = mockito::Server::new_async().await;
    let gw = gateway(&server.url());

    let created = server
        .mock("POST", "/api/newsletter-subscribers")
        .match_body(Matcher::PartialJson(json!({"data": {"email": "first@firm.com"}})))
        .with_status(200)
        .with_body(r#"{"data": {"id": 1}}"#)
        .create_async()
        .await;
    let conflict = server
        .mock("POST", "/api/newsletter-subscribers")
        .match_body(Matcher::PartialJson(json!({"data": {"email": "again@firm.com"}})))
        .with_status(409)
        .create_async()
        .await;

    assert_eq!(
        gw.subscribe("first@firm.com", "website").await.unwrap(),
        SubscribeOutcome::Subscribed
    );
    assert_eq!(
        gw.subscribe("again@firm.com", "website").await.unwrap(),
        SubscribeOutcome::AlreadySubscribed
    );
    created.assert_async().await;
    conflict.assert_async().await;
}

#[tokio::test]
async fn test_unsubscribe_not_found_is_an_outcome() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/newsletter-subscribers/unsubscribe")
        .with_status(404)
        .create_async()
        .await;

    let outcome = gateway(&server.url())
        .unsubscribe("ghost@firm.com", Some("moving on"))
        .await
        .unwrap();
    assert_eq!(outcome, UnsubscribeOutcome::NotFound);
}

#[tokio::test]
async fn test_bad_gateway_status_is_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/newsletter-subscribers/unsubscribe")
        .with_status(400)
        .with_body("bad payload")
        .create_async()
        .await;

    let err = gateway(&server.url())
        .unsubscribe("me@firm.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WealthpressError::Upstream { status: 400, .. }));
    assert!(!err.is_retryable());
}
