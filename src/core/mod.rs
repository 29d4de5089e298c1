//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Content entities, snapshot and search result types
//! - **xdg**: XDG directory handling
//! - **logging**: Tracing subscriber setup
//! - **content**: CMS/fixture sources and the live snapshot store
//! - **search**: Multi-entity fuzzy ranking and result grouping
//! - **feed**: RSS 2.0 generation
//! - **sitemap**: sitemaps.org generation
//! - **subscription**: Newsletter subscribe/unsubscribe gateway
//! - **routes**: Public site paths per entity
//! - **services**: Unified service container

pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod logging;
pub mod routes;
pub mod search;
pub mod services;
pub mod sitemap;
pub mod subscription;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, WealthpressError};
pub use services::Services;
