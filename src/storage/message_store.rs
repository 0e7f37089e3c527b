//! Message storage trait and the in-memory implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

/// A chat message between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: u64,
    /// Account id of the author
    pub sender: u64,
    /// Account id of the recipient
    pub receiver: u64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied when creating or fully replacing a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: u64,
    pub receiver: u64,
    pub content: String,
}

/// Fields supplied on a partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub sender: Option<u64>,
    pub receiver: Option<u64>,
    pub content: Option<String>,
}

/// Storage backing the messages resource
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All messages, oldest first
    async fn list(&self) -> Result<Vec<Message>>;

    async fn get(&self, id: u64) -> Result<Message>;

    async fn create(&self, message: NewMessage) -> Result<Message>;

    /// Replace every writable field of an existing message
    async fn replace(&self, id: u64, message: NewMessage) -> Result<Message>;

    async fn patch(&self, id: u64, patch: MessagePatch) -> Result<Message>;

    async fn delete(&self, id: u64) -> Result<()>;

    /// Messages sent by `sender` to `receiver`, oldest first
    async fn by_sender_receiver(&self, sender: u64, receiver: u64) -> Result<Vec<Message>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|m| m.sender == sender && m.receiver == receiver)
            .collect())
    }

    async fn by_sender(&self, sender: u64) -> Result<Vec<Message>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|m| m.sender == sender)
            .collect())
    }

    async fn by_receiver(&self, receiver: u64) -> Result<Vec<Message>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|m| m.receiver == receiver)
            .collect())
    }

    async fn count(&self) -> Result<usize>;
}

struct Inner {
    next_id: u64,
    messages: BTreeMap<u64, Message>,
}

/// Process-local message store
pub struct InMemoryMessageStore {
    inner: RwLock<Inner>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                messages: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("Message {} not found", id))
}

fn check_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "content: This field may not be blank.".to_string(),
        ));
    }
    Ok(())
}

/// Oldest first; ids break timestamp ties
fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn list(&self) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self.inner.read().messages.values().cloned().collect();
        sort_chronologically(&mut messages);
        Ok(messages)
    }

    async fn get(&self, id: u64) -> Result<Message> {
        self.inner
            .read()
            .messages
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, message: NewMessage) -> Result<Message> {
        check_content(&message.content)?;

        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let stored = Message {
            id,
            sender: message.sender,
            receiver: message.receiver,
            content: message.content,
            timestamp: Utc::now(),
        };
        inner.messages.insert(id, stored.clone());
        debug!(id, sender = stored.sender, receiver = stored.receiver, "Stored message");

        Ok(stored)
    }

    async fn replace(&self, id: u64, message: NewMessage) -> Result<Message> {
        check_content(&message.content)?;

        let mut inner = self.inner.write();
        let stored = inner.messages.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.sender = message.sender;
        stored.receiver = message.receiver;
        stored.content = message.content;

        Ok(stored.clone())
    }

    async fn patch(&self, id: u64, patch: MessagePatch) -> Result<Message> {
        if let Some(content) = &patch.content {
            check_content(content)?;
        }

        let mut inner = self.inner.write();
        let stored = inner.messages.get_mut(&id).ok_or_else(|| not_found(id))?;
        if let Some(sender) = patch.sender {
            stored.sender = sender;
        }
        if let Some(receiver) = patch.receiver {
            stored.receiver = receiver;
        }
        if let Some(content) = patch.content {
            stored.content = content;
        }

        Ok(stored.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.inner
            .write()
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().messages.len())
    }
}
