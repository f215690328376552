use std::sync::Arc;

use tracing::{info, instrument};

use models::product;
use crate::catalog::domain::{CreateProductInput, NewProduct, ProductPatch, ProductView, UpdateProductInput};
use crate::catalog::repository::{CatalogRepository, RepoError};
use crate::catalog::validation;
use crate::errors::ServiceError;

pub struct ProductService {
    repo: Arc<dyn CatalogRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    /// Create a product in an existing store. Stock defaults to 0.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateProductInput) -> Result<ProductView, ServiceError> {
        let name = validation::non_blank(input.name.as_deref());
        let store_id = validation::reference_id(input.store_id.as_ref());
        let (Some(name), Some(price), Some(store_id)) = (name, input.price.as_ref(), store_id) else {
            return Err(ServiceError::Validation("name, price and storeId are required; price and storeId must be numeric".into()));
        };
        let price = validation::price(price)?;
        let stock = match input.stock.as_ref().filter(|v| !v.is_null()) {
            Some(v) => validation::stock(v)?,
            None => 0,
        };

        self.repo.find_store(store_id).await?.ok_or_else(|| ServiceError::not_found("store"))?;

        let new = NewProduct { store_id, name, description: input.description, price, stock };
        let created = match self.repo.insert_product(new).await {
            Ok(p) => p,
            // store removed between the lookup and the insert
            Err(RepoError::ForeignKeyViolation(_)) => return Err(ServiceError::not_found("store")),
            Err(e) => return Err(e.into()),
        };
        info!(product_id = created.id, store_id, "product_created");
        self.view(created).await
    }

    /// All products, newest first, each with its store and owner.
    pub async fn list(&self) -> Result<Vec<ProductView>, ServiceError> {
        let rows = self.repo.list_products_with_owner().await?;
        Ok(rows.into_iter().map(|(p, s, u)| ProductView::new(p, s, &u)).collect())
    }

    /// Apply only the supplied fields. Price and stock are checked independently.
    #[instrument(skip(self, input))]
    pub async fn update(&self, raw_id: &str, input: UpdateProductInput) -> Result<ProductView, ServiceError> {
        let id = validation::parse_id(raw_id)?;
        let patch = patch_from(input)?;

        if self.repo.find_product(id).await?.is_none() {
            return Err(ServiceError::not_found("product"));
        }
        if patch.is_empty() {
            return Err(ServiceError::Validation("nothing to update".into()));
        }
        let updated = match self.repo.update_product(id, &patch).await {
            Ok(p) => p,
            Err(RepoError::NotFound) => return Err(ServiceError::not_found("product")),
            Err(e) => return Err(e.into()),
        };
        info!(product_id = id, "product_updated");
        self.view(updated).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = validation::parse_id(raw_id)?;
        if self.repo.find_product(id).await?.is_none() {
            return Err(ServiceError::not_found("product"));
        }
        match self.repo.delete_product(id).await {
            Ok(true) => {
                info!(product_id = id, "product_deleted");
                Ok(())
            }
            Ok(false) | Err(RepoError::NotFound) => Err(ServiceError::not_found("product")),
            Err(e) => Err(e.into()),
        }
    }

    async fn view(&self, p: product::Model) -> Result<ProductView, ServiceError> {
        let store = self
            .repo
            .find_store(p.store_id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("product {} references missing store {}", p.id, p.store_id)))?;
        let owner = self
            .repo
            .find_user(store.user_id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("store {} references missing user {}", store.id, store.user_id)))?;
        Ok(ProductView::new(p, store, &owner))
    }
}

/// Explicit `null` for name, price or stock counts as not supplied.
fn patch_from(input: UpdateProductInput) -> Result<ProductPatch, ServiceError> {
    let price = input.price.filter(|v| !v.is_null()).map(|v| validation::price(&v)).transpose()?;
    let stock = input.stock.filter(|v| !v.is_null()).map(|v| validation::stock(&v)).transpose()?;
    let name = match input.name {
        Some(n) => Some(
            validation::non_blank(Some(&n)).ok_or_else(|| ServiceError::Validation("name must not be empty".into()))?,
        ),
        None => None,
    };
    Ok(ProductPatch { name, description: input.description, price, stock })
}
