use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::store;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string; never leaves the process.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Store => Entity::has_one(store::Entity).into() }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    errors::require_text("email", email)?;
    if !email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
    Ok(())
}

/// Insert a user; `password_hash` must already be hashed.
pub async fn create<C: ConnectionTrait>(db: &C, name: &str, email: &str, password_hash: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password: Set(password_hash.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
