pub mod types;
pub mod utils;

/// Name reported by the identity endpoint and used as the `service` log field.
pub const SERVICE_NAME: &str = "catalog-api";
