//! Root-level HTTP handlers: health, mount indexes and the not-found fallback

use crate::api::endpoints::Mount;
use crate::api::models::{AdminIndexResponse, HealthResponse, RouteInfo};
use crate::error::AppError;
use crate::routing::Resolution;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        messages: state.messages.count().await?,
        accounts: state.accounts.count(),
    }))
}

/// Index of the chat mount: resource name to collection URL
#[utoipa::path(
    get,
    path = "/chat/",
    tag = "Messages",
    responses((status = 200, description = "Resource name to collection URL"))
)]
pub async fn chat_api_root(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Value> {
    let base = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|host| format!("http://{}", host))
        .unwrap_or_default();

    let mut index = Map::new();
    for (resource, route_name) in [("messages", "messages-list")] {
        if let Some(path) = state.routes.reverse(route_name) {
            index.insert(resource.to_string(), Value::String(format!("{}{}", base, path)));
        }
    }

    Json(Value::Object(index))
}

/// Admin index: counts and the full route table
#[utoipa::path(
    get,
    path = "/admin/",
    tag = "Admin",
    responses(
        (status = 200, description = "Service overview", body = AdminIndexResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("api_key" = []))
)]
pub async fn admin_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdminIndexResponse>, AppError> {
    let routes = state
        .routes
        .routes()
        .iter()
        .map(|entry| RouteInfo {
            method: entry.method.to_string(),
            path: entry.path.clone(),
            name: entry.name.clone(),
            handler: entry.handler.to_string(),
        })
        .collect();

    Ok(Json(AdminIndexResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        messages: state.messages.count().await?,
        accounts: state.accounts.count(),
        routes,
    }))
}

/// Answer for a routed path that has no handler for the request method
pub async fn method_not_allowed(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let allow = state
        .routes
        .allowed_methods(uri.path())
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(",");

    debug!(method = %method, path = %uri.path(), allow = %allow, "Method not allowed");
    ([(header::ALLOW, allow)], AppError::MethodNotAllowed(method)).into_response()
}

/// Fallback for requests no route matched.
///
/// A `GET`/`HEAD` for a path missing its trailing slash is redirected (301) when
/// the slashed path is routed; everything else is a JSON 404.
pub async fn fallback(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if (method == Method::GET || method == Method::HEAD) && !path.ends_with('/') {
        let slashed = format!("{}/", path);
        if state.routes.resolve(&method, &slashed) != Resolution::NotFound {
            let location = match uri.query() {
                Some(query) => format!("{}?{}", slashed, query),
                None => slashed,
            };
            debug!(from = %path, to = %location, "Appending trailing slash");
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
        }
    }

    debug!(
        method = %method,
        path = %path,
        mount = ?Mount::for_path(path),
        "No route matched"
    );
    AppError::NotFound("Not found.".to_string()).into_response()
}
