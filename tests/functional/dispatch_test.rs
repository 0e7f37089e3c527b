//! Functional tests: every entry of the route table is served by the router

#[path = "../common/mod.rs"]
mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};
use serde_json::{json, Value};
use wey_backend::api::endpoints::{site_routes, Endpoint};
use wey_backend::routing::ResourceAction;

/// Concrete request for a route entry, plus the status its handler answers with
fn request_for(endpoint: Endpoint, path: &str) -> (String, Option<Value>, StatusCode) {
    let path = path.replace("{id}", "1");
    let message = json!({"sender": 1, "receiver": 2, "content": "dispatch"});

    match endpoint {
        Endpoint::Messages(ResourceAction::Create) => (path, Some(message), StatusCode::CREATED),
        Endpoint::Messages(ResourceAction::Update) => (path, Some(message), StatusCode::OK),
        Endpoint::Messages(ResourceAction::PartialUpdate) => {
            (path, Some(json!({"content": "patched"})), StatusCode::OK)
        }
        Endpoint::Messages(ResourceAction::Destroy) => (path, None, StatusCode::NO_CONTENT),
        Endpoint::Accounts(ResourceAction::Create) => (
            path,
            Some(json!({"username": "dispatcher"})),
            StatusCode::CREATED,
        ),
        Endpoint::MessagesBySenderReceiver => {
            (format!("{}?sender=1&receiver=2", path), None, StatusCode::OK)
        }
        Endpoint::MessagesBySender => (format!("{}?sender=1", path), None, StatusCode::OK),
        Endpoint::MessagesByReceiver => (format!("{}?receiver=2", path), None, StatusCode::OK),
        _ => (path, None, StatusCode::OK),
    }
}

#[tokio::test]
async fn test_every_declared_route_is_served() {
    let (app, state) = test_app().await;

    // Item routes address message 1 and account 1
    state.accounts.create("seed", None).unwrap();
    send(
        &app,
        Method::POST,
        "/chat/messages/",
        Some(json!({"sender": 1, "receiver": 2, "content": "seed"})),
    )
    .await;

    let table = site_routes();
    // Destroy last so later item routes still find message 1
    let mut entries: Vec<_> = table.routes().iter().collect();
    entries.sort_by_key(|e| e.handler == Endpoint::Messages(ResourceAction::Destroy));

    for entry in entries {
        let (uri, body, expected) = request_for(entry.handler, &entry.path);
        let response = send(&app, entry.method.clone(), &uri, body).await;
        assert_eq!(
            response.status, expected,
            "{} {} ({}) answered {:?}",
            entry.method, uri, entry.handler, response.body
        );
    }
}

#[tokio::test]
async fn test_head_served_for_get_routes() {
    let (app, _) = test_app().await;

    let response = send(&app, Method::HEAD, "/chat/messages/", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::Null);
}

#[tokio::test]
async fn test_undeclared_methods_rejected_on_every_path() {
    let (app, _) = test_app().await;
    let table = site_routes();

    for path in table.paths() {
        let allowed = table.allowed_methods(path);
        let uri = path.replace("{id}", "1");
        for method in [Method::PUT, Method::DELETE, Method::CONNECT, Method::TRACE] {
            if allowed.contains(&method) {
                continue;
            }
            let response = send(&app, method.clone(), &uri, None).await;
            assert_eq!(
                response.status,
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {}",
                method,
                uri
            );
            assert!(response.body["detail"].is_string(), "{} {}", method, uri);
        }
    }
}

#[tokio::test]
async fn test_filter_routes_return_their_subset() {
    let (app, _) = test_app().await;

    for (sender, receiver, content) in [(1, 2, "1 to 2"), (2, 3, "2 to 3"), (3, 1, "3 to 1")] {
        let created = send(
            &app,
            Method::POST,
            "/chat/messages/",
            Some(json!({"sender": sender, "receiver": receiver, "content": content})),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let table = site_routes();
    let filters: Vec<_> = table
        .routes()
        .iter()
        .filter_map(|entry| {
            let (query, expected) = match entry.handler {
                Endpoint::MessagesBySenderReceiver => ("sender=2&receiver=3", "2 to 3"),
                Endpoint::MessagesBySender => ("sender=1", "1 to 2"),
                Endpoint::MessagesByReceiver => ("receiver=1", "3 to 1"),
                _ => return None,
            };
            Some((format!("{}?{}", entry.path, query), expected))
        })
        .collect();
    assert_eq!(filters.len(), 3);

    for (uri, expected) in filters {
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);

        let contents: Vec<&str> = response
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec![expected], "{}", uri);
    }
}
