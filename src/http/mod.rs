//! HTTP REST adapter
//!
//! Depends only on core/. Provides search, feed, sitemap and newsletter
//! endpoints via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::error::Result;
use crate::core::services::Services;

/// Build the API router with logging and CORS layers
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_handler))
        // Search
        .route("/api/v1/search", get(search_handler))
        .route("/api/v1/search/preview", get(search_preview_handler))
        // Syndication
        .route("/feed.xml", get(feed_handler))
        .route("/feed/category/:slug", get(category_feed_handler))
        .route("/feed/subcategory/:slug", get(subcategory_feed_handler))
        .route("/feed/author/:slug", get(author_feed_handler))
        .route("/feed/tag/:slug", get(tag_feed_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        // Newsletter
        .route("/api/v1/newsletter/subscribe", post(subscribe_handler))
        .route("/api/v1/newsletter/unsubscribe", post(unsubscribe_handler))
        // Add middleware
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services)
}

/// Bind the configured address and serve until the process exits
pub async fn serve(services: Arc<Services>) -> Result<()> {
    let addr = format!("{}:{}", services.config.server.host, services.config.server.port);
    let app = router(services);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load content, start the background refresher and serve
///
/// A failed initial load is logged and the server starts with an empty
/// snapshot; the refresher keeps retrying on its interval.
pub async fn start(services: Arc<Services>) -> Result<()> {
    if let Err(e) = services.content.refresh().await {
        tracing::error!(error = %e, "Initial content load failed; serving empty snapshot");
    }

    let interval = Duration::from_secs(services.config.content.refresh_interval_sec);
    let refresher = services.content.spawn_refresher(interval);
    tracing::info!(
        interval_sec = services.config.content.refresh_interval_sec,
        "Content refresher started"
    );

    let result = serve(services).await;
    refresher.abort();
    result
}
