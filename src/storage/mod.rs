//! Storage module - message store trait and in-memory collaborators

pub mod account_store;
pub mod message_store;

pub use account_store::{Account, AccountDirectory};
pub use message_store::{InMemoryMessageStore, Message, MessagePatch, MessageStore, NewMessage};
