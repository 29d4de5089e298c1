// Tests for CLI command execution against fixture-backed services

use wealthpress::cli::commands::{self, FeedArgs, SearchArgs, SitemapArgs};
use wealthpress::cli::OutputFormat;
use wealthpress::core::xdg::XdgDirs;

use crate::common::{create_test_services, create_test_services_with_newsletter, sample_snapshot};

#[tokio::test]
async fn test_search_command_both_formats() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = SearchArgs {
            query: "CRM".to_string(),
            limit: 3,
            grouped: false,
        };
        commands::search::execute(args, &services, format)
            .await
            .expect("search failed");
    }
}

#[tokio::test]
async fn test_grouped_search_command() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;

    let args = SearchArgs {
        query: "data".to_string(),
        limit: 10,
        grouped: true,
    };
    commands::search::execute(args, &services, OutputFormat::Json)
        .await
        .expect("grouped search failed");
}

#[tokio::test]
async fn test_feed_command_unknown_slug_fails() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;

    let args = FeedArgs {
        category: Some("missing".to_string()),
        subcategory: None,
        author: None,
        tag: None,
    };
    let result = commands::feed::execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_feed_and_sitemap_commands() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;

    let args = FeedArgs {
        category: None,
        subcategory: None,
        author: None,
        tag: Some("fiduciary".to_string()),
    };
    commands::feed::execute(args, &services, OutputFormat::Json)
        .await
        .expect("feed failed");

    for (list, format) in [
        (false, OutputFormat::Human),
        (true, OutputFormat::Human),
        (false, OutputFormat::Json),
    ] {
        commands::sitemap::execute(SitemapArgs { list }, &services, format)
            .await
            .expect("sitemap failed");
    }
}

#[tokio::test]
async fn test_subscribe_command() {
    let mut server = mockito::Server::new_async().await;
    let created = server
        .mock("POST", "/api/newsletter-subscribers")
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let (services, _fixture) =
        create_test_services_with_newsletter(&sample_snapshot(), &server.url()).await;

    let args = commands::SubscribeArgs {
        email: "advisor@firm.com".to_string(),
        source: None,
    };
    commands::subscribe::execute_subscribe(args, &services, OutputFormat::Human)
        .await
        .expect("subscribe failed");
    created.assert_async().await;
}

#[tokio::test]
async fn test_unsubscribe_command_rejects_bad_email() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;

    let args = commands::UnsubscribeArgs {
        email: "nope".to_string(),
        reason: None,
    };
    let result =
        commands::subscribe::execute_unsubscribe(args, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_show_config_command() {
    let (services, _fixture) = create_test_services(&sample_snapshot()).await;
    let xdg = XdgDirs::new();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        commands::config::execute(commands::ConfigArgs { all: true }, &services, &xdg, format)
            .await
            .expect("show-config failed");
    }
}
