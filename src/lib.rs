//! Wey Backend
//!
//! REST backend for a chat application: a `messages` resource under `chat/`,
//! accounts under `api/`, and an administrative interface under `admin/`. Every
//! route is declared in an explicit, enumerable route table.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routing;
pub mod storage;

pub use error::{AppError, Result};

use std::sync::Arc;
use tokio::sync::RwLock;

use api::endpoints::{site_routes, Endpoint};
use routing::RouteTable;
use storage::{AccountDirectory, InMemoryMessageStore, MessageStore};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<RwLock<config::Settings>>,
    pub messages: Arc<dyn MessageStore>,
    pub accounts: Arc<AccountDirectory>,
    pub routes: Arc<RouteTable<Endpoint>>,
}

impl AppState {
    /// State backed by the in-memory stores
    pub fn new(settings: config::Settings) -> Self {
        Self::with_message_store(settings, Arc::new(InMemoryMessageStore::new()))
    }

    /// State backed by a caller-provided message store
    pub fn with_message_store(settings: config::Settings, messages: Arc<dyn MessageStore>) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            messages,
            accounts: Arc::new(AccountDirectory::new()),
            routes: Arc::new(site_routes()),
        }
    }
}
