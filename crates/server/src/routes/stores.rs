use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use service::catalog::domain::{CreateStoreInput, StoreView, UpdateStoreInput};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/stores", tag = "stores",
    request_body = crate::openapi::CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = crate::openapi::StoreDoc),
        (status = 400, description = "Missing name or non-numeric userId", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "User already owns a store", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateStoreInput>,
) -> Result<(StatusCode, Json<StoreView>), JsonApiError> {
    let view = state.stores.create(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get, path = "/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store with owner and products", body = crate::openapi::StoreDoc),
        (status = 400, description = "Non-numeric id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Store not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<StoreView>, JsonApiError> {
    Ok(Json(state.stores.get(&id).await?))
}

#[utoipa::path(
    put, path = "/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store id")),
    request_body = crate::openapi::UpdateStoreRequest,
    responses(
        (status = 200, description = "Updated store", body = crate::openapi::StoreDoc),
        (status = 400, description = "Non-numeric id or missing name", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Store not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateStoreInput>,
) -> Result<Json<StoreView>, JsonApiError> {
    Ok(Json(state.stores.update(&id, input).await?))
}

#[utoipa::path(
    delete, path = "/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Store not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Store still has products", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    state.stores.delete(&id).await?;
    Ok(Json(Message::new("store deleted")))
}
