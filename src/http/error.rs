//! HTTP mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::WealthpressError;

/// Convert error to appropriate HTTP status code
pub fn status_code(err: &WealthpressError) -> StatusCode {
    match err {
        WealthpressError::NotFound(_) | WealthpressError::SubscriberNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        WealthpressError::AlreadySubscribed(_) => StatusCode::CONFLICT,
        WealthpressError::InvalidEmail(_) | WealthpressError::InvalidQuery(_) => {
            StatusCode::BAD_REQUEST
        }
        WealthpressError::ContentFetch(_)
        | WealthpressError::Upstream { .. }
        | WealthpressError::HttpError(_) => StatusCode::BAD_GATEWAY,
        WealthpressError::ConfigError(_) => StatusCode::SERVICE_UNAVAILABLE,
        WealthpressError::RenderError(_)
        | WealthpressError::IoError(_)
        | WealthpressError::SerdeError(_)
        | WealthpressError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for WealthpressError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
