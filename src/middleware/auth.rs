//! API key guard

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::error::AppError;

/// Header accepted as an alternative to `Authorization: Bearer`
pub const API_KEY_HEADER: &str = "x-api-key";

/// Set of keys accepted by the guard
#[derive(Debug, Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Extract the presented key from `Authorization: Bearer <key>` or `X-API-Key`
    pub fn presented(headers: &HeaderMap) -> Option<&str> {
        if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.trim());
            }
        }
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    }
}

/// Reject requests that do not carry a configured API key
pub async fn require_api_key(
    State(keys): State<Arc<ApiKeys>>,
    request: Request,
    next: Next,
) -> Response {
    let presented = ApiKeys::presented(request.headers());
    let key_present = presented.is_some();
    let authorized = presented.map_or(false, |key| keys.contains(key));

    if authorized {
        return next.run(request).await;
    }

    warn!(
        path = %request.uri().path(),
        key_present,
        "Rejected request without a valid API key"
    );
    AppError::Unauthorized.into_response()
}
