// Tests for CLI argument parsing

use clap::Parser;
use wealthpress::cli::{Cli, Commands, OutputFormat};
use wealthpress::core::feed::FeedScope;

#[test]
fn test_search_args() {
    let cli = Cli::parse_from(["wealthpress", "search", "fiduciary rule", "-k", "5", "--grouped"]);
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.query, "fiduciary rule");
            assert_eq!(args.limit, 5);
            assert!(args.grouped);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.format, OutputFormat::Human);
}

#[test]
fn test_global_format_flag() {
    let cli = Cli::parse_from(["wealthpress", "sitemap", "--format", "json"]);
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_feed_scope_flags() {
    let cli = Cli::parse_from(["wealthpress", "feed", "--author", "sarah-mitchell"]);
    match cli.command {
        Commands::Feed(args) => {
            assert_eq!(args.scope(), FeedScope::Author("sarah-mitchell".to_string()));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_feed_scope_flags_conflict() {
    let result = Cli::try_parse_from([
        "wealthpress",
        "feed",
        "--category",
        "compliance",
        "--tag",
        "fiduciary",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_subscribe_args() {
    let cli = Cli::parse_from(["wealthpress", "subscribe", "me@firm.com", "--source", "cli"]);
    match cli.command {
        Commands::Subscribe(args) => {
            assert_eq!(args.email, "me@firm.com");
            assert_eq!(args.source.as_deref(), Some("cli"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_serve_overrides() {
    let cli = Cli::parse_from(["wealthpress", "serve", "--port", "8080"]);
    match cli.command {
        Commands::Serve(args) => {
            let mut config = wealthpress::Config::default();
            args.apply(&mut config);
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "127.0.0.1");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
