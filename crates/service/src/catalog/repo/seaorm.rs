use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    ActiveValue, QueryOrder, Set,
};

use models::{product, store, user};

use crate::catalog::domain::{NewProduct, NewStore, NewUser, ProductPatch, StorePatch};
use crate::catalog::repository::{CatalogRepository, RepoError};

/// SeaORM-backed repository. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn insert_user(&self, new: NewUser) -> Result<user::Model, RepoError> {
        Ok(user::create(&self.db, &new.name, &new.email, &new.password_hash).await?)
    }

    async fn list_users(&self) -> Result<Vec<user::Model>, RepoError> {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    async fn find_user(&self, id: i32) -> Result<Option<user::Model>, RepoError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert_store(&self, new: NewStore) -> Result<store::Model, RepoError> {
        Ok(store::create(&self.db, new.user_id, &new.name, new.description.as_deref()).await?)
    }

    async fn find_store(&self, id: i32) -> Result<Option<store::Model>, RepoError> {
        Ok(store::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_store_by_user(&self, user_id: i32) -> Result<Option<store::Model>, RepoError> {
        Ok(store::Entity::find()
            .filter(store::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    async fn update_store(&self, id: i32, patch: &StorePatch) -> Result<store::Model, RepoError> {
        // Only the supplied columns end up in the UPDATE statement.
        let mut am = store::ActiveModel { id: ActiveValue::Unchanged(id), ..Default::default() };
        am.name = Set(patch.name.clone());
        if let Some(d) = &patch.description { am.description = Set(d.clone()); }
        Ok(am.update(&self.db).await?)
    }

    async fn delete_store(&self, id: i32) -> Result<bool, RepoError> {
        let res = store::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_product(&self, new: NewProduct) -> Result<product::Model, RepoError> {
        Ok(product::create(&self.db, new.store_id, &new.name, new.description.as_deref(), new.price, new.stock).await?)
    }

    async fn find_product(&self, id: i32) -> Result<Option<product::Model>, RepoError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn count_products_in_store(&self, store_id: i32) -> Result<u64, RepoError> {
        Ok(product::Entity::find()
            .filter(product::Column::StoreId.eq(store_id))
            .count(&self.db)
            .await?)
    }

    async fn list_products_in_store(&self, store_id: i32) -> Result<Vec<product::Model>, RepoError> {
        Ok(product::Entity::find()
            .filter(product::Column::StoreId.eq(store_id))
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_products_with_owner(&self) -> Result<Vec<(product::Model, store::Model, user::Model)>, RepoError> {
        let rows = product::Entity::find()
            .find_also_related(store::Entity)
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await?;

        let mut owner_ids: Vec<i32> = rows.iter().filter_map(|(_, s)| s.as_ref().map(|s| s.user_id)).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners: HashMap<i32, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(owner_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        rows.into_iter()
            .map(|(p, s)| {
                let s = s.ok_or_else(|| RepoError::Db(format!("product {} has no store", p.id)))?;
                let u = owners
                    .get(&s.user_id)
                    .cloned()
                    .ok_or_else(|| RepoError::Db(format!("store {} has no owner", s.id)))?;
                Ok((p, s, u))
            })
            .collect()
    }

    async fn update_product(&self, id: i32, patch: &ProductPatch) -> Result<product::Model, RepoError> {
        let mut am = product::ActiveModel { id: ActiveValue::Unchanged(id), ..Default::default() };
        if let Some(n) = &patch.name { am.name = Set(n.clone()); }
        if let Some(d) = &patch.description { am.description = Set(d.clone()); }
        if let Some(p) = patch.price { am.price = Set(p); }
        if let Some(s) = patch.stock { am.stock = Set(s); }
        Ok(am.update(&self.db).await?)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepoError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
