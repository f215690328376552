use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use service::catalog::domain::{CreateProductInput, ProductView, UpdateProductInput};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Store not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateProductInput>,
) -> Result<(StatusCode, Json<ProductView>), JsonApiError> {
    let view = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(get, path = "/products", tag = "products", responses((status = 200, description = "All products, newest first", body = [crate::openapi::ProductDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid field or nothing to update", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Product not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateProductInput>,
) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(state.products.update(&id, input).await?))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Product not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    state.products.delete(&id).await?;
    Ok(Json(Message::new("product deleted")))
}
