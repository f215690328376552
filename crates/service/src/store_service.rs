use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::{store, user};
use crate::catalog::domain::{CreateStoreInput, NewStore, StorePatch, StoreView, OwnerSummary, UpdateStoreInput};
use crate::catalog::repository::{CatalogRepository, RepoError};
use crate::catalog::validation;
use crate::errors::ServiceError;

const STORE_HAS_PRODUCTS: &str = "cannot delete a store that still has products";
const USER_HAS_STORE: &str = "user already owns a store";

/// Store rules: one store per user, no deletion while products remain.
pub struct StoreService {
    repo: Arc<dyn CatalogRepository>,
}

impl StoreService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    /// Create a store for an existing user.
    ///
    /// The "already owns a store" lookup only improves the common-case
    /// message; the unique `store.user_id` key decides.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateStoreInput) -> Result<StoreView, ServiceError> {
        let name = validation::non_blank(input.name.as_deref());
        let user_id = validation::reference_id(input.user_id.as_ref());
        let (Some(name), Some(user_id)) = (name, user_id) else {
            return Err(ServiceError::Validation("name and userId are required; userId must be numeric".into()));
        };

        let owner = self.repo.find_user(user_id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        if self.repo.find_store_by_user(user_id).await?.is_some() {
            return Err(ServiceError::Conflict(USER_HAS_STORE.into()));
        }

        let new = NewStore { user_id, name, description: input.description };
        let created = match self.repo.insert_store(new).await {
            Ok(s) => s,
            Err(RepoError::UniqueViolation(detail)) => {
                warn!(user_id, %detail, "store insert lost race on unique user_id");
                return Err(ServiceError::Conflict(USER_HAS_STORE.into()));
            }
            Err(RepoError::ForeignKeyViolation(_)) => return Err(ServiceError::not_found("user")),
            Err(e) => return Err(e.into()),
        };
        info!(store_id = created.id, user_id, "store_created");
        Ok(StoreView { store: created, user: OwnerSummary::with_created_at(&owner), products: None })
    }

    /// Store with owner and products (newest first).
    pub async fn get(&self, raw_id: &str) -> Result<StoreView, ServiceError> {
        let id = validation::parse_id(raw_id)?;
        let found = self.repo.find_store(id).await?.ok_or_else(|| ServiceError::not_found("store"))?;
        self.detailed(found).await
    }

    /// Rename a store; the description changes only when present in the request.
    #[instrument(skip(self, input))]
    pub async fn update(&self, raw_id: &str, input: UpdateStoreInput) -> Result<StoreView, ServiceError> {
        let id = validation::parse_id(raw_id)?;
        let name = validation::non_blank(input.name.as_deref())
            .ok_or_else(|| ServiceError::Validation("name is required".into()))?;

        if self.repo.find_store(id).await?.is_none() {
            return Err(ServiceError::not_found("store"));
        }
        let patch = StorePatch { name, description: input.description };
        let updated = match self.repo.update_store(id, &patch).await {
            Ok(s) => s,
            Err(RepoError::NotFound) => return Err(ServiceError::not_found("store")),
            Err(e) => return Err(e.into()),
        };
        info!(store_id = id, "store_updated");
        self.detailed(updated).await
    }

    /// Delete a store that owns no products.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = validation::parse_id(raw_id)?;
        if self.repo.find_store(id).await?.is_none() {
            return Err(ServiceError::not_found("store"));
        }
        if self.repo.count_products_in_store(id).await? > 0 {
            return Err(ServiceError::Conflict(STORE_HAS_PRODUCTS.into()));
        }
        match self.repo.delete_store(id).await {
            Ok(true) => {
                info!(store_id = id, "store_deleted");
                Ok(())
            }
            Ok(false) | Err(RepoError::NotFound) => Err(ServiceError::not_found("store")),
            Err(RepoError::ForeignKeyViolation(detail)) => {
                warn!(store_id = id, %detail, "store delete blocked by products added concurrently");
                Err(ServiceError::Conflict(STORE_HAS_PRODUCTS.into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn detailed(&self, found: store::Model) -> Result<StoreView, ServiceError> {
        let owner: user::Model = self
            .repo
            .find_user(found.user_id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("store {} references missing user {}", found.id, found.user_id)))?;
        let products = self.repo.list_products_in_store(found.id).await?;
        Ok(StoreView { store: found, user: OwnerSummary::with_created_at(&owner), products: Some(products) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::CreateProductInput;
    use crate::test_support::{catalog, product_input, store_input, user_input};
    use proptest::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_embeds_owner() -> Result<(), anyhow::Error> {
        let (_, users, stores, _) = catalog();
        let u = users.create(user_input("Ana", "a@x.com")).await?;
        let view = stores.create(store_input("Loja", json!(u.id))).await?;
        assert_eq!(view.store.user_id, u.id);
        assert_eq!(view.user.email, "a@x.com");
        assert!(view.products.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn second_store_for_same_user_conflicts() -> Result<(), anyhow::Error> {
        let (_, users, stores, _) = catalog();
        let u = users.create(user_input("Ana", "a@x.com")).await?;
        stores.create(store_input("Loja", json!(1))).await?;
        let err = stores.create(store_input("Loja2", json!(u.id))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn create_validation_and_missing_user() {
        let (_, _, stores, _) = catalog();
        let no_name = CreateStoreInput { name: None, description: None, user_id: Some(json!(1)) };
        assert!(matches!(stores.create(no_name).await, Err(ServiceError::Validation(_))));
        assert!(matches!(stores.create(store_input("Loja", json!("abc"))).await, Err(ServiceError::Validation(_))));
        assert!(matches!(stores.create(store_input("Loja", json!(99))).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_includes_products_newest_first() -> Result<(), anyhow::Error> {
        let (_, users, stores, products) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        let s = stores.create(store_input("Loja", json!(1))).await?;
        let first = products.create(product_input("A", json!(1), json!(s.store.id))).await?;
        let second = products.create(product_input("B", json!(2), json!(s.store.id))).await?;

        let view = stores.get(&s.store.id.to_string()).await?;
        let ids: Vec<i32> = view.products.unwrap_or_default().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.product.id, first.product.id]);
        assert!(view.user.created_at.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn get_rejects_bad_and_unknown_ids() {
        let (_, _, stores, _) = catalog();
        assert!(matches!(stores.get("abc").await, Err(ServiceError::Validation(_))));
        assert!(matches!(stores.get("42").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_keeps_description_unless_supplied() -> Result<(), anyhow::Error> {
        let (_, users, stores, _) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        let input = CreateStoreInput { name: Some("Loja".into()), description: Some("antiga".into()), user_id: Some(json!(1)) };
        let s = stores.create(input).await?;
        let id = s.store.id.to_string();

        let renamed = stores.update(&id, UpdateStoreInput { name: Some("Nova".into()), description: None }).await?;
        assert_eq!(renamed.store.name, "Nova");
        assert_eq!(renamed.store.description.as_deref(), Some("antiga"));

        let cleared = stores.update(&id, UpdateStoreInput { name: Some("Nova".into()), description: Some(None) }).await?;
        assert_eq!(cleared.store.description, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_name_and_existing_store() -> Result<(), anyhow::Error> {
        let (_, users, stores, _) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        stores.create(store_input("Loja", json!(1))).await?;
        let blank = UpdateStoreInput { name: Some("  ".into()), description: None };
        assert!(matches!(stores.update("1", blank).await, Err(ServiceError::Validation(_))));
        let named = UpdateStoreInput { name: Some("X".into()), description: None };
        assert!(matches!(stores.update("7", named.clone()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(stores.update("x", named).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_blocked_by_products_then_allowed() -> Result<(), anyhow::Error> {
        let (_, users, stores, products) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        stores.create(store_input("Loja", json!(1))).await?;
        let p = products.create(product_input("Caneca", json!(10), json!(1))).await?;

        assert!(matches!(stores.delete("1").await, Err(ServiceError::Conflict(_))));

        products.delete(&p.product.id.to_string()).await?;
        stores.delete("1").await?;
        assert!(matches!(stores.get("1").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(stores.delete("1").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_race_with_new_product_still_conflicts() -> Result<(), anyhow::Error> {
        let (repo, users, stores, products) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        stores.create(store_input("Loja", json!(1))).await?;
        products.create(CreateProductInput { name: Some("A".into()), price: Some(json!(1)), store_id: Some(json!(1)), ..Default::default() }).await?;

        // count says zero, the foreign key still refuses
        repo.set_stale_product_counts(true);
        assert!(matches!(stores.delete("1").await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_race_past_precheck_still_conflicts() -> Result<(), anyhow::Error> {
        let (repo, users, stores, _) = catalog();
        users.create(user_input("Ana", "a@x.com")).await?;
        stores.create(store_input("Loja", json!(1))).await?;

        repo.set_stale_store_lookups(true);
        let err = stores.create(store_input("Loja2", json!(1))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// However many concurrent creations target one user, and whether or not
        /// the pre-check sees the winner, exactly one succeeds and the rest conflict.
        #[test]
        fn concurrent_store_creation_single_winner(attempts in 2usize..8, stale in any::<bool>()) {
            let rt = tokio::runtime::Builder::new_multi_thread().worker_threads(4).enable_all().build().unwrap();
            let (ok, conflicts) = rt.block_on(async move {
                let (repo, users, stores, _) = catalog();
                users.create(user_input("Ana", "a@x.com")).await.unwrap();
                repo.set_stale_store_lookups(stale);
                let stores = Arc::new(stores);

                let handles: Vec<_> = (0..attempts)
                    .map(|i| {
                        let stores = Arc::clone(&stores);
                        tokio::spawn(async move { stores.create(store_input(&format!("Loja{i}"), json!(1))).await })
                    })
                    .collect();

                let (mut ok, mut conflicts) = (0, 0);
                for h in handles {
                    match h.await.unwrap() {
                        Ok(_) => ok += 1,
                        Err(ServiceError::Conflict(_)) => conflicts += 1,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                (ok, conflicts)
            });
            prop_assert_eq!(ok, 1);
            prop_assert_eq!(conflicts, attempts - 1);
        }
    }
}
