//! Token-bucket rate limiting

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use crate::error::AppError;

/// Shared limiter for one group of routes
pub struct RequestLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl RequestLimiter {
    /// Zero values are clamped to one
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(Quota::per_second(rps).allow_burst(burst)),
        }
    }

    /// Take one token; `false` when the bucket is empty
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

pub async fn limit_requests(
    State(limiter): State<Arc<RequestLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "Rate limit exceeded");
        AppError::RateLimited.into_response()
    }
}
