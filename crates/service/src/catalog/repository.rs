use async_trait::async_trait;
use models::{product, store, user};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use super::domain::{NewProduct, NewStore, NewUser, ProductPatch, StorePatch};

/// Persistence failures the services care to tell apart.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("record not found")]
    NotFound,
    #[error("invalid record: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for RepoError {
    fn from(e: DbErr) -> Self {
        if matches!(e, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) {
            return RepoError::NotFound;
        }
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(m)) => RepoError::UniqueViolation(m),
            Some(SqlErr::ForeignKeyConstraintViolation(m)) => RepoError::ForeignKeyViolation(m),
            _ => RepoError::Db(e.to_string()),
        }
    }
}

impl From<models::errors::ModelError> for RepoError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => RepoError::Invalid(m),
            models::errors::ModelError::Db(e) => e.into(),
        }
    }
}

/// Repository abstraction over the relational store.
///
/// Implementations must surface uniqueness and foreign-key rejections as
/// `UniqueViolation` / `ForeignKeyViolation`; the services rely on them when
/// their own pre-checks lose a race.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_user(&self, new: NewUser) -> Result<user::Model, RepoError>;
    /// Ordered by id ascending.
    async fn list_users(&self) -> Result<Vec<user::Model>, RepoError>;
    async fn find_user(&self, id: i32) -> Result<Option<user::Model>, RepoError>;

    async fn insert_store(&self, new: NewStore) -> Result<store::Model, RepoError>;
    async fn find_store(&self, id: i32) -> Result<Option<store::Model>, RepoError>;
    async fn find_store_by_user(&self, user_id: i32) -> Result<Option<store::Model>, RepoError>;
    async fn update_store(&self, id: i32, patch: &StorePatch) -> Result<store::Model, RepoError>;
    /// `Ok(false)` when nothing was deleted.
    async fn delete_store(&self, id: i32) -> Result<bool, RepoError>;

    async fn insert_product(&self, new: NewProduct) -> Result<product::Model, RepoError>;
    async fn find_product(&self, id: i32) -> Result<Option<product::Model>, RepoError>;
    async fn count_products_in_store(&self, store_id: i32) -> Result<u64, RepoError>;
    /// Newest first.
    async fn list_products_in_store(&self, store_id: i32) -> Result<Vec<product::Model>, RepoError>;
    /// Every product with its store and the store's owner, newest first.
    async fn list_products_with_owner(&self) -> Result<Vec<(product::Model, store::Model, user::Model)>, RepoError>;
    async fn update_product(&self, id: i32, patch: &ProductPatch) -> Result<product::Model, RepoError>;
    async fn delete_product(&self, id: i32) -> Result<bool, RepoError>;
}

/// In-memory repository for tests and benches.
///
/// Emulates the schema constraints: unique `user.email`, unique `store.user_id`,
/// and the foreign keys (including RESTRICT on deleting a store with products).
pub mod mock {
    use super::*;
    use std::cmp::Ordering;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    #[derive(Default)]
    struct Tables {
        users: BTreeMap<i32, user::Model>,
        stores: BTreeMap<i32, store::Model>,
        products: BTreeMap<i32, product::Model>,
        next_user_id: i32,
        next_store_id: i32,
        next_product_id: i32,
    }

    fn next(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn newest_first(a: &product::Model, b: &product::Model) -> Ordering {
        b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
    }

    #[derive(Default)]
    pub struct MockCatalogRepository {
        tables: Mutex<Tables>,
        stale_store_lookups: AtomicBool,
        stale_product_counts: AtomicBool,
        fail_all: AtomicBool,
    }

    impl MockCatalogRepository {
        /// Make `find_store_by_user` miss, as if a concurrent insert had not committed yet.
        pub fn set_stale_store_lookups(&self, on: bool) {
            self.stale_store_lookups.store(on, AtomicOrdering::SeqCst);
        }

        /// Make `count_products_in_store` report zero regardless of contents.
        pub fn set_stale_product_counts(&self, on: bool) {
            self.stale_product_counts.store(on, AtomicOrdering::SeqCst);
        }

        /// Fail every call with an opaque database error.
        pub fn set_fail_all(&self, on: bool) {
            self.fail_all.store(on, AtomicOrdering::SeqCst);
        }

        fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepoError> {
            if self.fail_all.load(AtomicOrdering::SeqCst) {
                return Err(RepoError::Db("connection refused (mock)".into()));
            }
            self.tables.lock().map_err(|_| RepoError::Db("mock lock poisoned".into()))
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn insert_user(&self, new: NewUser) -> Result<user::Model, RepoError> {
            let mut t = self.tables()?;
            if t.users.values().any(|u| u.email == new.email) {
                return Err(RepoError::UniqueViolation("user_email_key".into()));
            }
            let id = next(&mut t.next_user_id);
            let u = user::Model { id, name: new.name, email: new.email, password: new.password_hash, created_at: Utc::now().into() };
            t.users.insert(id, u.clone());
            Ok(u)
        }

        async fn list_users(&self) -> Result<Vec<user::Model>, RepoError> {
            Ok(self.tables()?.users.values().cloned().collect())
        }

        async fn find_user(&self, id: i32) -> Result<Option<user::Model>, RepoError> {
            Ok(self.tables()?.users.get(&id).cloned())
        }

        async fn insert_store(&self, new: NewStore) -> Result<store::Model, RepoError> {
            let mut t = self.tables()?;
            if !t.users.contains_key(&new.user_id) {
                return Err(RepoError::ForeignKeyViolation("fk_store_user".into()));
            }
            if t.stores.values().any(|s| s.user_id == new.user_id) {
                return Err(RepoError::UniqueViolation("store_user_id_key".into()));
            }
            let id = next(&mut t.next_store_id);
            let s = store::Model { id, name: new.name, description: new.description, user_id: new.user_id, created_at: Utc::now().into() };
            t.stores.insert(id, s.clone());
            Ok(s)
        }

        async fn find_store(&self, id: i32) -> Result<Option<store::Model>, RepoError> {
            Ok(self.tables()?.stores.get(&id).cloned())
        }

        async fn find_store_by_user(&self, user_id: i32) -> Result<Option<store::Model>, RepoError> {
            let t = self.tables()?;
            if self.stale_store_lookups.load(AtomicOrdering::SeqCst) {
                return Ok(None);
            }
            Ok(t.stores.values().find(|s| s.user_id == user_id).cloned())
        }

        async fn update_store(&self, id: i32, patch: &StorePatch) -> Result<store::Model, RepoError> {
            let mut t = self.tables()?;
            let s = t.stores.get_mut(&id).ok_or(RepoError::NotFound)?;
            patch.apply_to(s);
            Ok(s.clone())
        }

        async fn delete_store(&self, id: i32) -> Result<bool, RepoError> {
            let mut t = self.tables()?;
            if t.products.values().any(|p| p.store_id == id) {
                return Err(RepoError::ForeignKeyViolation("fk_product_store".into()));
            }
            Ok(t.stores.remove(&id).is_some())
        }

        async fn insert_product(&self, new: NewProduct) -> Result<product::Model, RepoError> {
            let mut t = self.tables()?;
            if !t.stores.contains_key(&new.store_id) {
                return Err(RepoError::ForeignKeyViolation("fk_product_store".into()));
            }
            let id = next(&mut t.next_product_id);
            let p = product::Model {
                id,
                name: new.name,
                description: new.description,
                price: new.price,
                stock: new.stock,
                store_id: new.store_id,
                created_at: Utc::now().into(),
            };
            t.products.insert(id, p.clone());
            Ok(p)
        }

        async fn find_product(&self, id: i32) -> Result<Option<product::Model>, RepoError> {
            Ok(self.tables()?.products.get(&id).cloned())
        }

        async fn count_products_in_store(&self, store_id: i32) -> Result<u64, RepoError> {
            let t = self.tables()?;
            if self.stale_product_counts.load(AtomicOrdering::SeqCst) {
                return Ok(0);
            }
            Ok(t.products.values().filter(|p| p.store_id == store_id).count() as u64)
        }

        async fn list_products_in_store(&self, store_id: i32) -> Result<Vec<product::Model>, RepoError> {
            let t = self.tables()?;
            let mut items: Vec<_> = t.products.values().filter(|p| p.store_id == store_id).cloned().collect();
            items.sort_by(newest_first);
            Ok(items)
        }

        async fn list_products_with_owner(&self) -> Result<Vec<(product::Model, store::Model, user::Model)>, RepoError> {
            let t = self.tables()?;
            let mut items: Vec<_> = t.products.values().cloned().collect();
            items.sort_by(newest_first);
            items
                .into_iter()
                .map(|p| {
                    let s = t.stores.get(&p.store_id).cloned().ok_or(RepoError::NotFound)?;
                    let u = t.users.get(&s.user_id).cloned().ok_or(RepoError::NotFound)?;
                    Ok((p, s, u))
                })
                .collect()
        }

        async fn update_product(&self, id: i32, patch: &ProductPatch) -> Result<product::Model, RepoError> {
            let mut t = self.tables()?;
            let p = t.products.get_mut(&id).ok_or(RepoError::NotFound)?;
            patch.apply_to(p);
            Ok(p.clone())
        }

        async fn delete_product(&self, id: i32) -> Result<bool, RepoError> {
            Ok(self.tables()?.products.remove(&id).is_some())
        }
    }
}
