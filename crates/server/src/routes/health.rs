use axum::Json;
use common::types::{ServiceIdentity, Status};
use common::SERVICE_NAME;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service identity", body = crate::openapi::ServiceIdentityDoc)))]
pub async fn root() -> Json<ServiceIdentity> {
    Json(ServiceIdentity::new(SERVICE_NAME))
}

#[utoipa::path(get, path = "/status", tag = "health", responses((status = 200, description = "Liveness message", body = crate::openapi::MessageDoc)))]
pub async fn status() -> Json<Status> {
    Json(Status::online())
}
