use std::sync::Arc;

use serde_json::Value;

use crate::catalog::domain::{CreateProductInput, CreateStoreInput, CreateUserInput};
use crate::catalog::repository::mock::MockCatalogRepository;
use crate::{ProductService, StoreService, UserService};

/// Services sharing one in-memory repository; the repository handle is
/// returned too so tests can flip its failure switches.
pub fn catalog() -> (Arc<MockCatalogRepository>, UserService, StoreService, ProductService) {
    let repo = Arc::new(MockCatalogRepository::default());
    (
        repo.clone(),
        UserService::new(repo.clone()),
        StoreService::new(repo.clone()),
        ProductService::new(repo.clone()),
    )
}

/// `catalog()` with user 1 (`a@x.com`) owning store 1.
pub async fn seeded_catalog(
) -> Result<(Arc<MockCatalogRepository>, UserService, StoreService, ProductService), anyhow::Error> {
    let (repo, users, stores, products) = catalog();
    users.create(user_input("Ana", "a@x.com")).await?;
    stores.create(store_input("Loja", serde_json::json!(1))).await?;
    Ok((repo, users, stores, products))
}

pub fn user_input(name: &str, email: &str) -> CreateUserInput {
    CreateUserInput { name: Some(name.into()), email: Some(email.into()), password: Some("p".into()) }
}

pub fn store_input(name: &str, user_id: Value) -> CreateStoreInput {
    CreateStoreInput { name: Some(name.into()), description: None, user_id: Some(user_id) }
}

pub fn product_input(name: &str, price: Value, store_id: Value) -> CreateProductInput {
    CreateProductInput { name: Some(name.into()), price: Some(price), store_id: Some(store_id), ..Default::default() }
}
