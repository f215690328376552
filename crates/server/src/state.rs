use std::sync::Arc;

use service::catalog::repo::SeaOrmCatalogRepository;
use service::catalog::CatalogRepository;
use service::{ProductService, StoreService, UserService};

/// Shared handler state. All services hold the same repository.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UserService>,
    pub stores: Arc<StoreService>,
    pub products: Arc<ProductService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            users: Arc::new(UserService::new(repo.clone())),
            stores: Arc::new(StoreService::new(repo.clone())),
            products: Arc::new(ProductService::new(repo)),
        }
    }

    pub fn from_db(db: sea_orm::DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmCatalogRepository::new(db)))
    }
}
