use axum::extract::FromRequest;

use crate::errors::JsonApiError;

/// `axum::Json` whose rejection is rendered as a 400 `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct JsonBody<T>(pub T);
