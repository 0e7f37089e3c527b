//! HTTP router construction
//!
//! The axum router is generated from the site [`RouteTable`]: every entry's
//! method and path template is attached to the handler its [`Endpoint`] names,
//! so the served routes and the enumerable table cannot drift apart.

use crate::api::endpoints::{Endpoint, Mount};
use crate::api::models::*;
use crate::api::{account_handlers, handlers, message_handlers};
use crate::middleware::{limit_requests, require_api_key, ApiKeys, RequestLimiter};
use crate::routing::{to_axum_path, ResourceAction, RouteTable};
use crate::storage::{Account, Message};
use crate::AppState;
use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, MethodFilter, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wey Backend API",
        description = "Chat messages and accounts over REST.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        handlers::health_check,
        handlers::chat_api_root,
        handlers::admin_index,
        message_handlers::list_messages,
        message_handlers::create_message,
        message_handlers::retrieve_message,
        message_handlers::update_message,
        message_handlers::partial_update_message,
        message_handlers::destroy_message,
        message_handlers::get_messages_by_sender_receiver,
        message_handlers::get_messages_by_sender,
        message_handlers::get_messages_by_receiver,
        account_handlers::list_accounts,
        account_handlers::create_account,
        account_handlers::retrieve_account,
    ),
    components(schemas(
        Message,
        MessageRequest,
        PatchMessageRequest,
        Account,
        CreateAccountRequest,
        HealthResponse,
        RouteInfo,
        AdminIndexResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Messages", description = "Chat message resource"),
        (name = "Accounts", description = "Account sub-application"),
        (name = "Admin", description = "Administrative interface"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
            );
        }
    }
}

/// Create the main application router
pub async fn create_router(state: Arc<AppState>) -> Router {
    let (auth_enabled, api_keys, rate_limit_enabled, rps, burst, allowed_origins) = {
        let config = state.settings.read().await;
        (
            config.auth.enabled,
            config.auth.api_keys.clone(),
            config.rate_limit.enabled,
            config.rate_limit.requests_per_second,
            config.rate_limit.burst_size,
            config.cors.allowed_origins.clone(),
        )
    };

    let api_keys = Arc::new(ApiKeys::new(api_keys));
    let limiter = Arc::new(RequestLimiter::new(rps, burst));

    let mut router = Router::new()
        // Health check endpoint (no auth, no rate limit)
        .route("/health", get(handlers::health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    for mount in Mount::ALL {
        let mut mount_router = build_routes(&mount.table());

        match mount {
            Mount::Admin if auth_enabled => {
                mount_router =
                    mount_router.route_layer(from_fn_with_state(api_keys.clone(), require_api_key));
            }
            Mount::Api | Mount::Chat if rate_limit_enabled => {
                mount_router =
                    mount_router.route_layer(from_fn_with_state(limiter.clone(), limit_requests));
            }
            _ => {}
        }

        router = router.merge(mount_router);
    }

    router
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(cors_layer(&allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build axum routes for every entry of `table`
pub fn build_routes(table: &RouteTable<Endpoint>) -> Router<Arc<AppState>> {
    let mut router = Router::new();

    for path in table.paths() {
        let mut method_router = MethodRouter::new();
        for entry in table.routes().iter().filter(|e| e.path == path) {
            method_router = attach(method_router, &entry.method, entry.handler);
        }
        router = router.route(
            &to_axum_path(path),
            method_router.fallback(handlers::method_not_allowed),
        );
    }

    router
}

/// Attach the handler named by `endpoint` for `method`
fn attach(
    method_router: MethodRouter<Arc<AppState>>,
    method: &Method,
    endpoint: Endpoint,
) -> MethodRouter<Arc<AppState>> {
    let Ok(filter) = MethodFilter::try_from(method.clone()) else {
        warn!(method = %method, endpoint = %endpoint, "Skipping route with unsupported method");
        return method_router;
    };

    match endpoint {
        Endpoint::ChatRoot => method_router.on(filter, handlers::chat_api_root),
        Endpoint::AdminIndex => method_router.on(filter, handlers::admin_index),
        Endpoint::Messages(action) => match action {
            ResourceAction::List => method_router.on(filter, message_handlers::list_messages),
            ResourceAction::Create => method_router.on(filter, message_handlers::create_message),
            ResourceAction::Retrieve => {
                method_router.on(filter, message_handlers::retrieve_message)
            }
            ResourceAction::Update => method_router.on(filter, message_handlers::update_message),
            ResourceAction::PartialUpdate => {
                method_router.on(filter, message_handlers::partial_update_message)
            }
            ResourceAction::Destroy => {
                method_router.on(filter, message_handlers::destroy_message)
            }
        },
        Endpoint::MessagesBySenderReceiver => {
            method_router.on(filter, message_handlers::get_messages_by_sender_receiver)
        }
        Endpoint::MessagesBySender => {
            method_router.on(filter, message_handlers::get_messages_by_sender)
        }
        Endpoint::MessagesByReceiver => {
            method_router.on(filter, message_handlers::get_messages_by_receiver)
        }
        Endpoint::Accounts(action) => match action {
            ResourceAction::List => method_router.on(filter, account_handlers::list_accounts),
            ResourceAction::Create => method_router.on(filter, account_handlers::create_account),
            ResourceAction::Retrieve => {
                method_router.on(filter, account_handlers::retrieve_account)
            }
            ResourceAction::Update | ResourceAction::PartialUpdate | ResourceAction::Destroy => {
                warn!(endpoint = %endpoint, "Accounts do not implement this action");
                method_router
            }
        },
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
