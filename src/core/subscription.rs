//! Newsletter subscription gateway.
//!
//! Subscriber records live in the CMS; this module validates addresses
//! locally and forwards the call. "Already subscribed" and "not found"
//! come back as outcomes, not errors.

use crate::core::error::{Result, WealthpressError};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// RFC 5321 path limit
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$")
        .expect("Invalid email regex")
});

/// Normalise and syntax-check an address
///
/// Returns the trimmed, lowercased address.
pub fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(&email) {
        return Err(WealthpressError::InvalidEmail(raw.trim().to_string()));
    }
    Ok(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotFound,
}

impl SubscribeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscribeOutcome::Subscribed => "subscribed",
            SubscribeOutcome::AlreadySubscribed => "already_subscribed",
        }
    }
}

impl UnsubscribeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsubscribeOutcome::Unsubscribed => "unsubscribed",
            UnsubscribeOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    data: SubscriberData<'a>,
}

#[derive(Serialize)]
struct SubscriberData<'a> {
    email: &'a str,
    source: &'a str,
}

#[derive(Serialize)]
struct UnsubscribeBody<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// Client for the CMS subscriber endpoints
#[derive(Debug, Clone)]
pub struct NewsletterGateway {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl NewsletterGateway {
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wealthpress/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Newsletter request");
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    pub async fn subscribe(&self, email: &str, source: &str) -> Result<SubscribeOutcome> {
        let email = validate_email(email)?;
        let body = SubscribeBody {
            data: SubscriberData {
                email: &email,
                source,
            },
        };
        let response = self.post("/api/newsletter-subscribers", &body).await?;

        match response.status() {
            s if s.is_success() => {
                info!(source, "Newsletter subscription created");
                Ok(SubscribeOutcome::Subscribed)
            }
            StatusCode::CONFLICT => Ok(SubscribeOutcome::AlreadySubscribed),
            _ => Err(upstream(response).await),
        }
    }

    pub async fn unsubscribe(&self, email: &str, reason: Option<&str>) -> Result<UnsubscribeOutcome> {
        let email = validate_email(email)?;
        let body = UnsubscribeBody {
            email: &email,
            reason: reason.map(str::trim).filter(|r| !r.is_empty()),
        };
        let response = self
            .post("/api/newsletter-subscribers/unsubscribe", &body)
            .await?;

        match response.status() {
            s if s.is_success() => {
                info!("Newsletter subscription removed");
                Ok(UnsubscribeOutcome::Unsubscribed)
            }
            StatusCode::NOT_FOUND => Ok(UnsubscribeOutcome::NotFound),
            _ => Err(upstream(response).await),
        }
    }
}

async fn upstream(response: reqwest::Response) -> WealthpressError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(200).collect();
    WealthpressError::Upstream { status, message }
}
