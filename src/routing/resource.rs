//! Conventional route derivation for resource handlers

use axum::http::Method;

use super::table::RouteTable;

/// Standard operations of a resource handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    List,
    Create,
    Retrieve,
    Update,
    PartialUpdate,
    Destroy,
}

impl ResourceAction {
    pub const ALL: [ResourceAction; 6] = [
        ResourceAction::List,
        ResourceAction::Create,
        ResourceAction::Retrieve,
        ResourceAction::Update,
        ResourceAction::PartialUpdate,
        ResourceAction::Destroy,
    ];

    /// HTTP method the action is exposed on
    pub fn method(self) -> Method {
        match self {
            ResourceAction::List | ResourceAction::Retrieve => Method::GET,
            ResourceAction::Create => Method::POST,
            ResourceAction::Update => Method::PUT,
            ResourceAction::PartialUpdate => Method::PATCH,
            ResourceAction::Destroy => Method::DELETE,
        }
    }

    /// Whether the action addresses a single item (`{prefix}/{id}/`)
    pub fn is_detail(self) -> bool {
        !matches!(self, ResourceAction::List | ResourceAction::Create)
    }
}

impl<H: Clone> RouteTable<H> {
    /// Register the collection and item routes of a resource handler.
    ///
    /// `actions` maps each standard action to the handler key serving it;
    /// returning `None` leaves the action unregistered.
    pub fn register_resource<F>(mut self, prefix: &str, basename: &str, actions: F) -> Self
    where
        F: Fn(ResourceAction) -> Option<H>,
    {
        let prefix = prefix.trim_matches('/');
        let list_path = format!("/{}/", prefix);
        let detail_path = format!("/{}/{{id}}/", prefix);

        for action in ResourceAction::ALL {
            let Some(handler) = actions(action) else {
                continue;
            };
            let (path, name) = if action.is_detail() {
                (&detail_path, format!("{}-detail", basename))
            } else {
                (&list_path, format!("{}-list", basename))
            };
            self = self.route(action.method(), path, &name, handler);
        }
        self
    }
}
