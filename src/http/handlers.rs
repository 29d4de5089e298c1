//! HTTP request handlers for the Wealthpress API
//!
//! Search, syndication, sitemap and newsletter endpoints. Every handler
//! reads the snapshot current at request time.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::error::WealthpressError;
use crate::core::feed::{FeedScope, RSS_CONTENT_TYPE};
use crate::core::search::GroupedResults;
use crate::core::services::Services;
use crate::core::subscription::{validate_email, SubscribeOutcome, UnsubscribeOutcome};
use crate::core::types::*;

/// `?q=` parameter; a missing query behaves like an empty one
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    fn query(self) -> String {
        self.q.unwrap_or_default()
    }
}

/// Dropdown view: capped groups plus uncapped per-group totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPreviewResponse {
    pub query: String,
    pub groups: GroupedResults,
    pub totals: ContentCounts,
    pub duration_ms: u64,
}

/// Health check handler
///
/// Returns server status, version and the size of the live snapshot.
pub async fn health_handler(State(services): State<Arc<Services>>) -> impl IntoResponse {
    let snapshot = services.content.current();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        content: ContentCounts::from(snapshot.as_ref()),
        fetched_at: snapshot.fetched_at.map(|t| t.to_rfc3339()),
    })
}

/// Flat ranked search
///
/// Queries under the minimum length return an empty result list, not
/// an error.
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query = params.query();
    let start = Instant::now();
    let snapshot = services.content.current();
    let results = services.ranker.search(&query, &snapshot);

    Json(SearchResponse {
        count: results.len(),
        results,
        duration_ms: start.elapsed().as_millis() as u64,
        query,
    })
}

/// Grouped, capped search for the header dropdown
pub async fn search_preview_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchPreviewResponse> {
    let query = params.query();
    let start = Instant::now();
    let snapshot = services.content.current();
    let grouped = GroupedResults::from_results(services.ranker.search(&query, &snapshot));
    let totals = grouped.counts();

    Json(SearchPreviewResponse {
        groups: grouped.capped(&services.config.search.dropdown),
        totals,
        duration_ms: start.elapsed().as_millis() as u64,
        query,
    })
}

fn render_feed(services: &Services, scope: FeedScope) -> Result<Response, WealthpressError> {
    let snapshot = services.content.current();
    let xml = services.feed.render(&snapshot, &scope)?;

    Ok((
        [
            (header::CONTENT_TYPE, RSS_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, services.feed.cache_control()),
        ],
        xml,
    )
        .into_response())
}

/// Site-wide feed
pub async fn feed_handler(
    State(services): State<Arc<Services>>,
) -> Result<Response, WealthpressError> {
    render_feed(&services, FeedScope::All)
}

pub async fn category_feed_handler(
    State(services): State<Arc<Services>>,
    Path(slug): Path<String>,
) -> Result<Response, WealthpressError> {
    render_feed(&services, FeedScope::Category(slug))
}

pub async fn subcategory_feed_handler(
    State(services): State<Arc<Services>>,
    Path(slug): Path<String>,
) -> Result<Response, WealthpressError> {
    render_feed(&services, FeedScope::Subcategory(slug))
}

pub async fn author_feed_handler(
    State(services): State<Arc<Services>>,
    Path(slug): Path<String>,
) -> Result<Response, WealthpressError> {
    render_feed(&services, FeedScope::Author(slug))
}

pub async fn tag_feed_handler(
    State(services): State<Arc<Services>>,
    Path(slug): Path<String>,
) -> Result<Response, WealthpressError> {
    render_feed(&services, FeedScope::Tag(slug))
}

/// sitemaps.org index of every public page
pub async fn sitemap_handler(State(services): State<Arc<Services>>) -> Response {
    let snapshot = services.content.current();
    let xml = services.sitemap.render(&snapshot);
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response()
}

/// Newsletter signup
///
/// 201 on a new subscription, 409 when the address is already on the list.
pub async fn subscribe_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), WealthpressError> {
    // Reject before touching the gateway
    let email = validate_email(&req.email)?;
    let gateway = services.newsletter()?;
    let source = req
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(services.config.newsletter.default_source.as_str());

    let outcome = gateway.subscribe(&email, source).await?;
    let status = match outcome {
        SubscribeOutcome::Subscribed => StatusCode::CREATED,
        SubscribeOutcome::AlreadySubscribed => StatusCode::CONFLICT,
    };

    Ok((
        status,
        Json(SubscriptionResponse {
            status: outcome.as_str().to_string(),
            email,
        }),
    ))
}

/// Newsletter removal
///
/// 200 when removed, 404 when the address was never subscribed.
pub async fn unsubscribe_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), WealthpressError> {
    let email = validate_email(&req.email)?;
    let gateway = services.newsletter()?;

    let outcome = gateway.unsubscribe(&email, req.reason.as_deref()).await?;
    let status = match outcome {
        UnsubscribeOutcome::Unsubscribed => StatusCode::OK,
        UnsubscribeOutcome::NotFound => StatusCode::NOT_FOUND,
    };

    Ok((
        status,
        Json(SubscriptionResponse {
            status: outcome.as_str().to_string(),
            email,
        }),
    ))
}
