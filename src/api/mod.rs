//! API module - route tables, HTTP routes, handlers, and models

pub mod account_handlers;
pub mod endpoints;
pub mod extract;
pub mod handlers;
pub mod message_handlers;
pub mod models;
pub mod routes;
