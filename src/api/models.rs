//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, Result};
use crate::storage::{MessagePatch, NewMessage};

/// Body of `POST /chat/messages/` and `PUT /chat/messages/{id}/`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MessageRequest {
    /// Account id of the author
    pub sender: u64,
    /// Account id of the recipient
    pub receiver: u64,
    pub content: String,
}

impl From<MessageRequest> for NewMessage {
    fn from(request: MessageRequest) -> Self {
        NewMessage {
            sender: request.sender,
            receiver: request.receiver,
            content: request.content,
        }
    }
}

/// Body of `PATCH /chat/messages/{id}/`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PatchMessageRequest {
    #[serde(default)]
    pub sender: Option<u64>,
    #[serde(default)]
    pub receiver: Option<u64>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<PatchMessageRequest> for MessagePatch {
    fn from(request: PatchMessageRequest) -> Self {
        MessagePatch {
            sender: request.sender,
            receiver: request.receiver,
            content: request.content,
        }
    }
}

/// Query parameters of the message filter endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageFilterQuery {
    /// Sender account id
    pub sender: Option<String>,
    /// Receiver account id
    pub receiver: Option<String>,
}

impl MessageFilterQuery {
    pub fn sender(&self) -> Result<u64> {
        required_id("sender", self.sender.as_deref())
    }

    pub fn receiver(&self) -> Result<u64> {
        required_id("receiver", self.receiver.as_deref())
    }
}

fn required_id(name: &str, value: Option<&str>) -> Result<u64> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidRequest(format!("'{}' query parameter is required", name)))?;

    value.parse().map_err(|_| {
        AppError::InvalidRequest(format!(
            "'{}' query parameter must be a non-negative integer",
            name
        ))
    })
}

/// Parse an item id from the path. Ids that cannot exist are reported as not found.
pub fn parse_item_id(raw: &str, resource: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{} '{}' not found", resource, raw)))
}

/// Body of `POST /api/accounts/`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub messages: usize,
    pub accounts: usize,
}

/// One row of the admin route listing
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
    pub name: String,
    pub handler: String,
}

/// Admin index response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AdminIndexResponse {
    pub version: String,
    pub messages: usize,
    pub accounts: usize,
    pub routes: Vec<RouteInfo>,
}
