//! Request extractors whose rejections are reported as [`AppError`]

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Missing, malformed or mistyped bodies become a 400 with a
/// `detail` message instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters, rejected the same way as [`ApiJson`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
