use serde::{Deserialize, Serialize};

/// Body of `GET /`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceIdentity {
    pub ok: bool,
    pub service: String,
}

impl ServiceIdentity {
    pub fn new(service: &str) -> Self {
        Self { ok: true, service: service.to_string() }
    }
}

/// Body of `GET /status`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Status {
    pub message: String,
}

impl Status {
    pub fn online() -> Self {
        Self { message: "API Online".into() }
    }
}

/// Confirmation returned by delete endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
