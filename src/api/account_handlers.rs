//! Handlers of the account sub-application

use crate::api::extract::ApiJson;
use crate::api::models::{parse_item_id, CreateAccountRequest};
use crate::error::AppError;
use crate::storage::Account;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// List registered accounts
#[utoipa::path(
    get,
    path = "/api/accounts/",
    tag = "Accounts",
    responses((status = 200, description = "All accounts ordered by id", body = [Account]))
)]
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<Vec<Account>> {
    Json(state.accounts.list())
}

/// Register an account
#[utoipa::path(
    post,
    path = "/api/accounts/",
    tag = "Accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Blank username or malformed body"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = state.accounts.create(&request.username, request.email)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Retrieve one account
#[utoipa::path(
    get,
    path = "/api/accounts/{id}/",
    tag = "Accounts",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account", body = Account),
        (status = 404, description = "No such account")
    )
)]
pub async fn retrieve_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let id = parse_item_id(&id, "Account")?;
    Ok(Json(state.accounts.get(id)?))
}
