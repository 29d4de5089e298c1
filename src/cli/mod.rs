//! CLI adapter for Wealthpress
//!
//! Provides a command-line interface over the same core services the
//! HTTP adapter uses. Both depend on `core/` but not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Wealthpress - content service for a wealth-management publication
///
/// Search articles, authors, tags, categories and subcategories, render
/// RSS feeds and the sitemap, manage newsletter subscriptions, or run the
/// HTTP server.
#[derive(Parser, Debug)]
#[command(name = "wealthpress")]
#[command(author = "Wealthpress Editorial Engineering")]
#[command(version)]
#[command(about = "Wealthpress content service", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzzy search across all content
    Search(commands::SearchArgs),

    /// Render an RSS feed
    Feed(commands::FeedArgs),

    /// Render the sitemap
    Sitemap(commands::SitemapArgs),

    /// Subscribe an address to the newsletter
    Subscribe(commands::SubscribeArgs),

    /// Remove an address from the newsletter
    Unsubscribe(commands::UnsubscribeArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Run the HTTP server
    Serve(commands::ServeArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  wealthpress completions bash > ~/.local/share/bash-completion/completions/wealthpress
    ///   zsh:   wealthpress completions zsh > ~/.zfunc/_wealthpress
    ///   fish:  wealthpress completions fish > ~/.config/fish/completions/wealthpress.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let mut config = Config::load_with_xdg(&xdg)?;
    if let Commands::Serve(args) = &cli.command {
        args.apply(&mut config);
    }

    // Create services
    let services = Arc::new(Services::from_config(config)?);

    // Execute command
    match cli.command {
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Feed(args) => commands::feed::execute(args, &services, cli.format).await,
        Commands::Sitemap(args) => commands::sitemap::execute(args, &services, cli.format).await,
        Commands::Subscribe(args) => {
            commands::subscribe::execute_subscribe(args, &services, cli.format).await
        }
        Commands::Unsubscribe(args) => {
            commands::subscribe::execute_unsubscribe(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => {
            commands::config::execute(args, &services, &xdg, cli.format).await
        }
        Commands::Serve(args) => commands::serve::execute(args, services).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
