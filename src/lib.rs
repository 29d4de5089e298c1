//! Wealthpress - content service for a wealth-management publication
//!
//! Loads articles, authors, categories, subcategories and tags from a
//! headless CMS and serves fuzzy multi-entity search, RSS feeds, a
//! sitemap and newsletter subscription on top of them.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - content (CMS client, fixture source, snapshot store)
//!   - search (fuzzy ranker, dropdown grouping)
//!   - feed, sitemap, subscription
//!   - services (unified service container)
//!
//! - **http**: REST API adapter (depends on core)
//!   - handlers, middleware
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Typo-tolerant search across five collections in one ranking
//! - Snapshot swapped atomically on refresh, previous kept on failure
//! - Per-scope RSS feeds with cache headers
//! - Configuration via TOML, XDG paths and environment

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{Result, WealthpressError};
pub use crate::core::services::Services;
pub use crate::core::types::*;
