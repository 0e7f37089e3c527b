//! Unit tests for the site route table

use axum::http::Method;
use wey_backend::api::endpoints::{site_routes, Endpoint, Mount};
use wey_backend::routing::{Resolution, ResourceAction};

fn resolved(method: Method, path: &str) -> Endpoint {
    match site_routes().resolve(&method, path) {
        Resolution::Matched { handler, .. } => handler,
        other => panic!("{} {} did not resolve: {:?}", method, path, other),
    }
}

#[test]
fn test_declared_routes_dispatch_to_named_handlers() {
    let cases = [
        (Method::GET, "/chat/messages/", Endpoint::Messages(ResourceAction::List)),
        (Method::POST, "/chat/messages/", Endpoint::Messages(ResourceAction::Create)),
        (Method::GET, "/chat/messages/7/", Endpoint::Messages(ResourceAction::Retrieve)),
        (Method::PUT, "/chat/messages/7/", Endpoint::Messages(ResourceAction::Update)),
        (Method::PATCH, "/chat/messages/7/", Endpoint::Messages(ResourceAction::PartialUpdate)),
        (Method::DELETE, "/chat/messages/7/", Endpoint::Messages(ResourceAction::Destroy)),
        (Method::GET, "/chat/messages-by-sender-receiver/", Endpoint::MessagesBySenderReceiver),
        (Method::GET, "/chat/messages-by-sender/", Endpoint::MessagesBySender),
        (Method::GET, "/chat/messages-by-receiver/", Endpoint::MessagesByReceiver),
        (Method::GET, "/chat/", Endpoint::ChatRoot),
        (Method::GET, "/api/accounts/", Endpoint::Accounts(ResourceAction::List)),
        (Method::POST, "/api/accounts/", Endpoint::Accounts(ResourceAction::Create)),
        (Method::GET, "/api/accounts/3/", Endpoint::Accounts(ResourceAction::Retrieve)),
        (Method::GET, "/admin/", Endpoint::AdminIndex),
    ];

    for (method, path, expected) in cases {
        assert_eq!(resolved(method.clone(), path), expected, "{} {}", method, path);
    }
}

#[test]
fn test_detail_route_captures_id() {
    match site_routes().resolve(&Method::GET, "/chat/messages/42/") {
        Resolution::Matched { name, params, .. } => {
            assert_eq!(name, "messages-detail");
            assert_eq!(params.get("id").map(String::as_str), Some("42"));
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn test_filter_path_is_not_a_detail_route() {
    // "messages-by-sender" is a sibling of "messages", not an item id
    assert_eq!(
        resolved(Method::GET, "/chat/messages-by-sender/"),
        Endpoint::MessagesBySender
    );
    assert_eq!(
        site_routes().resolve(&Method::GET, "/chat/messages/by-sender/extra/"),
        Resolution::NotFound
    );
}

#[test]
fn test_head_resolves_to_get() {
    assert_eq!(
        resolved(Method::HEAD, "/chat/messages/"),
        Endpoint::Messages(ResourceAction::List)
    );
}

#[test]
fn test_unsupported_method_on_collection() {
    match site_routes().resolve(&Method::CONNECT, "/chat/messages/") {
        Resolution::MethodNotAllowed { allowed } => {
            assert!(allowed.contains(&Method::GET));
            assert!(allowed.contains(&Method::POST));
            assert!(!allowed.contains(&Method::CONNECT));
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn test_filter_endpoints_are_get_only() {
    let table = site_routes();
    for path in [
        "/chat/messages-by-sender-receiver/",
        "/chat/messages-by-sender/",
        "/chat/messages-by-receiver/",
    ] {
        assert_eq!(
            table.resolve(&Method::POST, path),
            Resolution::MethodNotAllowed {
                allowed: vec![Method::GET, Method::HEAD]
            },
            "{}",
            path
        );
    }
}

#[test]
fn test_undeclared_paths_not_found() {
    let table = site_routes();
    for path in ["/", "/chat/conversations/", "/chat/messages", "/accounts/", "/api/"] {
        assert_eq!(table.resolve(&Method::GET, path), Resolution::NotFound, "{}", path);
    }
}

#[test]
fn test_accounts_are_not_writable_by_item() {
    assert!(matches!(
        site_routes().resolve(&Method::DELETE, "/api/accounts/3/"),
        Resolution::MethodNotAllowed { .. }
    ));
}

#[test]
fn test_every_route_lives_under_a_mount() {
    for entry in site_routes().routes() {
        assert!(
            Mount::for_path(&entry.path).is_some(),
            "{} is outside every mount",
            entry.path
        );
    }
}

#[test]
fn test_reverse_lookup() {
    let table = site_routes();
    assert_eq!(table.reverse("messages-list"), Some("/chat/messages/"));
    assert_eq!(
        table.reverse("messages_by_sender_receiver"),
        Some("/chat/messages-by-sender-receiver/")
    );
    assert_eq!(table.reverse("accounts-detail"), Some("/api/accounts/{id}/"));
    assert_eq!(table.reverse("nope"), None);
}
