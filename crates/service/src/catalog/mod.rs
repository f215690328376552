//! Catalog module: domain payloads, persistence abstraction and validation.
//!
//! The services in the crate root hold an `Arc<dyn CatalogRepository>`; the
//! SeaORM implementation lives in `repo::seaorm`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod validation;

pub use repository::{CatalogRepository, RepoError};
