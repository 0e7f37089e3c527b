//! Handlers of the messages resource

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::models::{parse_item_id, MessageFilterQuery, MessageRequest, PatchMessageRequest};
use crate::error::AppError;
use crate::storage::Message;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

/// List all messages, oldest first
#[utoipa::path(
    get,
    path = "/chat/messages/",
    tag = "Messages",
    responses((status = 200, description = "All messages", body = [Message]))
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.messages.list().await?;
    Ok(Json(messages))
}

/// Create a message
#[utoipa::path(
    post,
    path = "/chat/messages/",
    tag = "Messages",
    request_body = MessageRequest,
    responses(
        (status = 201, description = "Message created", body = Message),
        (status = 400, description = "Blank content or malformed body")
    )
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<MessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = state.messages.create(request.into()).await?;

    info!(
        id = message.id,
        sender = message.sender,
        receiver = message.receiver,
        "Message created"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Retrieve one message
#[utoipa::path(
    get,
    path = "/chat/messages/{id}/",
    tag = "Messages",
    params(("id" = u64, Path, description = "Message id")),
    responses(
        (status = 200, description = "The message", body = Message),
        (status = 404, description = "No such message")
    )
)]
pub async fn retrieve_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    let id = parse_item_id(&id, "Message")?;
    Ok(Json(state.messages.get(id).await?))
}

/// Replace a message
#[utoipa::path(
    put,
    path = "/chat/messages/{id}/",
    tag = "Messages",
    params(("id" = u64, Path, description = "Message id")),
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Updated message", body = Message),
        (status = 400, description = "Blank content or malformed body"),
        (status = 404, description = "No such message")
    )
)]
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<MessageRequest>,
) -> Result<Json<Message>, AppError> {
    let id = parse_item_id(&id, "Message")?;
    let message = state.messages.replace(id, request.into()).await?;

    info!(id, "Message replaced");

    Ok(Json(message))
}

/// Update some fields of a message
#[utoipa::path(
    patch,
    path = "/chat/messages/{id}/",
    tag = "Messages",
    params(("id" = u64, Path, description = "Message id")),
    request_body = PatchMessageRequest,
    responses(
        (status = 200, description = "Updated message", body = Message),
        (status = 400, description = "Blank content or malformed body"),
        (status = 404, description = "No such message")
    )
)]
pub async fn partial_update_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<PatchMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let id = parse_item_id(&id, "Message")?;
    let message = state.messages.patch(id, request.into()).await?;

    info!(id, "Message patched");

    Ok(Json(message))
}

/// Delete a message
#[utoipa::path(
    delete,
    path = "/chat/messages/{id}/",
    tag = "Messages",
    params(("id" = u64, Path, description = "Message id")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 404, description = "No such message")
    )
)]
pub async fn destroy_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_item_id(&id, "Message")?;
    state.messages.delete(id).await?;

    info!(id, "Message deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Messages sent by one account to another
#[utoipa::path(
    get,
    path = "/chat/messages-by-sender-receiver/",
    tag = "Messages",
    params(MessageFilterQuery),
    responses(
        (status = 200, description = "Matching messages, oldest first", body = [Message]),
        (status = 400, description = "Missing or malformed sender/receiver")
    )
)]
pub async fn get_messages_by_sender_receiver(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MessageFilterQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let sender = query.sender()?;
    let receiver = query.receiver()?;
    let messages = state.messages.by_sender_receiver(sender, receiver).await?;

    info!(sender, receiver, count = messages.len(), "Filtered messages by sender and receiver");

    Ok(Json(messages))
}

/// Messages sent by one account
#[utoipa::path(
    get,
    path = "/chat/messages-by-sender/",
    tag = "Messages",
    params(MessageFilterQuery),
    responses(
        (status = 200, description = "Matching messages, oldest first", body = [Message]),
        (status = 400, description = "Missing or malformed sender")
    )
)]
pub async fn get_messages_by_sender(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MessageFilterQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let sender = query.sender()?;
    let messages = state.messages.by_sender(sender).await?;

    info!(sender, count = messages.len(), "Filtered messages by sender");

    Ok(Json(messages))
}

/// Messages received by one account
#[utoipa::path(
    get,
    path = "/chat/messages-by-receiver/",
    tag = "Messages",
    params(MessageFilterQuery),
    responses(
        (status = 200, description = "Matching messages, oldest first", body = [Message]),
        (status = 400, description = "Missing or malformed receiver")
    )
)]
pub async fn get_messages_by_receiver(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MessageFilterQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let receiver = query.receiver()?;
    let messages = state.messages.by_receiver(receiver).await?;

    info!(receiver, count = messages.len(), "Filtered messages by receiver");

    Ok(Json(messages))
}
