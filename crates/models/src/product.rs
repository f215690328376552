use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::store;

/// Largest price a `decimal(10, 2)` column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub store_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Store => Entity::belongs_to(store::Entity)
                .from(Column::StoreId)
                .to(store::Column::Id)
                .into(),
        }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name)
}

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("price must be >= 0".into()));
    }
    if price > MAX_PRICE {
        return Err(ModelError::Validation("price is too large".into()));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), ModelError> {
    if stock < 0 { return Err(ModelError::Validation("stock must be >= 0".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    store_id: i32,
    name: &str,
    description: Option<&str>,
    price: Decimal,
    stock: i32,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_price(price)?;
    validate_stock(stock)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        price: Set(price.round_dp(2)),
        stock: Set(stock),
        store_id: Set(store_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
