//! Error types and error handling for the Wealthpress content service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (HTTP status codes)
//! is handled in the respective adapter modules.

use thiserror::Error;

/// Result type alias for Wealthpress operations
pub type Result<T> = std::result::Result<T, WealthpressError>;

/// Main error type for the Wealthpress service
#[derive(Error, Debug)]
pub enum WealthpressError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Email already subscribed: {0}")]
    AlreadySubscribed(String),

    #[error("Subscriber not found: {0}")]
    SubscriberNotFound(String),

    #[error("Content fetch failed: {0}")]
    ContentFetch(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl WealthpressError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WealthpressError::NotFound(_) | WealthpressError::SubscriberNotFound(_)
        )
    }

    /// Check if this is a conflict error (already exists)
    pub fn is_conflict(&self) -> bool {
        matches!(self, WealthpressError::AlreadySubscribed(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            WealthpressError::InvalidEmail(_) | WealthpressError::InvalidQuery(_)
        )
    }

    /// Check if the failure came from the CMS rather than from us
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WealthpressError::ContentFetch(_)
                | WealthpressError::Upstream { .. }
                | WealthpressError::HttpError(_)
        )
    }

    /// Whether repeating the same request might succeed
    ///
    /// Timeouts, connection failures, 429 and 5xx are transient.
    /// Everything else (4xx, decode failures, local errors) is permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            WealthpressError::HttpError(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                match e.status() {
                    Some(status) => status.as_u16() == 429 || status.is_server_error(),
                    None => false,
                }
            }
            WealthpressError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
