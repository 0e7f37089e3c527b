//! Request middleware

pub mod auth;
pub mod rate_limit;

pub use auth::{require_api_key, ApiKeys};
pub use rate_limit::{limit_requests, RequestLimiter};
