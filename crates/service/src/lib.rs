//! Service layer implementing the catalog rules on top of models.
//! - Validates requests before touching persistence.
//! - Treats database constraint violations as the source of truth for conflicts.
//! - Talks to storage only through the `CatalogRepository` trait.

pub mod errors;
pub mod catalog;
pub mod user_service;
pub mod store_service;
pub mod product_service;
#[cfg(test)]
pub mod test_support;

pub use product_service::ProductService;
pub use store_service::StoreService;
pub use user_service::UserService;
