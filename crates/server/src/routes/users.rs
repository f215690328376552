use axum::{extract::State, http::StatusCode, Json};
use models::user;
use service::catalog::domain::CreateUserInput;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/usuarios", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::openapi::UserDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> Result<(StatusCode, Json<user::Model>), JsonApiError> {
    let created = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/usuarios", tag = "users", responses((status = 200, description = "All users", body = [crate::openapi::UserDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    Ok(Json(state.users.list().await?))
}
