//! Route tables for the mounted sub-applications
//!
//! Each sub-application declares its routes relative to its mount prefix. The
//! site table is the union of the mounts and is the single source the axum
//! router is built from.

use axum::http::Method;
use std::fmt;

use crate::routing::{ResourceAction, RouteTable};

/// Handler reference stored in the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Index of the chat mount listing its resources
    ChatRoot,
    Messages(ResourceAction),
    MessagesBySenderReceiver,
    MessagesBySender,
    MessagesByReceiver,
    Accounts(ResourceAction),
    AdminIndex,
}

impl Endpoint {
    /// Qualified name of the handler method serving this endpoint
    pub fn handler_name(&self) -> &'static str {
        match self {
            Endpoint::ChatRoot => "chat::api_root",
            Endpoint::Messages(action) => match action {
                ResourceAction::List => "messages::list",
                ResourceAction::Create => "messages::create",
                ResourceAction::Retrieve => "messages::retrieve",
                ResourceAction::Update => "messages::update",
                ResourceAction::PartialUpdate => "messages::partial_update",
                ResourceAction::Destroy => "messages::destroy",
            },
            Endpoint::MessagesBySenderReceiver => "messages::get_messages_by_sender_receiver",
            Endpoint::MessagesBySender => "messages::get_messages_by_sender",
            Endpoint::MessagesByReceiver => "messages::get_messages_by_receiver",
            Endpoint::Accounts(action) => match action {
                ResourceAction::List => "accounts::list",
                ResourceAction::Create => "accounts::create",
                ResourceAction::Retrieve => "accounts::retrieve",
                ResourceAction::Update => "accounts::update",
                ResourceAction::PartialUpdate => "accounts::partial_update",
                ResourceAction::Destroy => "accounts::destroy",
            },
            Endpoint::AdminIndex => "admin::index",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// Sub-applications mounted on the root router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mount {
    Api,
    Admin,
    Chat,
}

impl Mount {
    pub const ALL: [Mount; 3] = [Mount::Api, Mount::Admin, Mount::Chat];

    pub fn prefix(self) -> &'static str {
        match self {
            Mount::Api => "api",
            Mount::Admin => "admin",
            Mount::Chat => "chat",
        }
    }

    /// Routes relative to the mount prefix
    pub fn routes(self) -> RouteTable<Endpoint> {
        match self {
            Mount::Api => account_routes(),
            Mount::Admin => admin_routes(),
            Mount::Chat => chat_routes(),
        }
    }

    /// Routes with the mount prefix applied
    pub fn table(self) -> RouteTable<Endpoint> {
        RouteTable::new().nest(self.prefix(), self.routes())
    }

    /// Mount owning `path`, chosen by longest matching prefix
    pub fn for_path(path: &str) -> Option<Mount> {
        let trimmed = path.trim_start_matches('/');
        Mount::ALL
            .into_iter()
            .filter(|m| {
                let prefix = m.prefix();
                trimmed == prefix
                    || trimmed
                        .strip_prefix(prefix)
                        .map_or(false, |rest| rest.starts_with('/'))
            })
            .max_by_key(|m| m.prefix().len())
    }
}

/// Messaging sub-application
pub fn chat_routes() -> RouteTable<Endpoint> {
    RouteTable::new()
        .route(Method::GET, "/", "api-root", Endpoint::ChatRoot)
        .register_resource("messages", "messages", |action| {
            Some(Endpoint::Messages(action))
        })
        .route(
            Method::GET,
            "messages-by-sender-receiver",
            "messages_by_sender_receiver",
            Endpoint::MessagesBySenderReceiver,
        )
        .route(
            Method::GET,
            "messages-by-sender",
            "messages_by_sender",
            Endpoint::MessagesBySender,
        )
        .route(
            Method::GET,
            "messages-by-receiver",
            "messages_by_receiver",
            Endpoint::MessagesByReceiver,
        )
}

/// Account sub-application
pub fn account_routes() -> RouteTable<Endpoint> {
    RouteTable::new().register_resource("accounts", "accounts", |action| match action {
        ResourceAction::List | ResourceAction::Create | ResourceAction::Retrieve => {
            Some(Endpoint::Accounts(action))
        }
        _ => None,
    })
}

/// Administrative interface
pub fn admin_routes() -> RouteTable<Endpoint> {
    RouteTable::new().route(Method::GET, "/", "admin-index", Endpoint::AdminIndex)
}

/// Every route the service answers under its mounts
pub fn site_routes() -> RouteTable<Endpoint> {
    Mount::ALL
        .into_iter()
        .fold(RouteTable::new(), |table, mount| {
            table.nest(mount.prefix(), mount.routes())
        })
}
