use models::{product, store, user};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Signup payload. Fields are optional so missing ones become validation errors.
#[derive(Clone, Default, Deserialize)]
pub struct CreateUserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Numeric fields stay as raw JSON so numbers and numeric strings are both accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default)]
    pub store_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
}

/// Validated insert payloads handed to the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewStore {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub store_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

/// Store update: the name is mandatory, the description only changes when supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePatch {
    pub name: String,
    pub description: Option<Option<String>>,
}

impl StorePatch {
    pub fn apply_to(&self, store: &mut store::Model) {
        store.name = self.name.clone();
        if let Some(d) = &self.description {
            store.description = d.clone();
        }
    }
}

/// Product update: every field is independent; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none() && self.stock.is_none()
    }

    pub fn apply_to(&self, product: &mut product::Model) {
        if let Some(n) = &self.name { product.name = n.clone(); }
        if let Some(d) = &self.description { product.description = d.clone(); }
        if let Some(p) = self.price { product.price = p; }
        if let Some(s) = self.stock { product.stock = s; }
    }
}

/// Owner as embedded in store/product responses. The password never appears here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTimeWithTimeZone>,
}

impl OwnerSummary {
    /// id, name, email and creation timestamp.
    pub fn with_created_at(u: &user::Model) -> Self {
        Self { id: u.id, name: u.name.clone(), email: u.email.clone(), created_at: Some(u.created_at) }
    }

    /// id, name and email only.
    pub fn contact(u: &user::Model) -> Self {
        Self { id: u.id, name: u.name.clone(), email: u.email.clone(), created_at: None }
    }
}

/// Store with its owner and, for reads and updates, its products (newest first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    #[serde(flatten)]
    pub store: store::Model,
    pub user: OwnerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<product::Model>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreWithOwner {
    #[serde(flatten)]
    pub store: store::Model,
    pub user: OwnerSummary,
}

/// Product with its store and the store's owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: product::Model,
    pub store: StoreWithOwner,
}

impl ProductView {
    pub fn new(product: product::Model, store: store::Model, owner: &user::Model) -> Self {
        Self { product, store: StoreWithOwner { store, user: OwnerSummary::contact(owner) } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product() -> product::Model {
        product::Model {
            id: 1,
            name: "Caneca".into(),
            description: Some("azul".into()),
            price: Decimal::new(1000, 2),
            stock: 0,
            store_id: 1,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn absent_and_null_description_differ() {
        let absent: UpdateStoreInput = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.description, None);
        let null: UpdateStoreInput = serde_json::from_str(r#"{"name":"x","description":null}"#).unwrap();
        assert_eq!(null.description, Some(None));
        let set: UpdateStoreInput = serde_json::from_str(r#"{"description":"d"}"#).unwrap();
        assert_eq!(set.description, Some(Some("d".into())));
    }

    #[test]
    fn stock_only_patch_keeps_other_fields() {
        let mut p = product();
        let patch = ProductPatch { stock: Some(5), ..Default::default() };
        assert!(!patch.is_empty());
        patch.apply_to(&mut p);
        assert_eq!(p.stock, 5);
        assert_eq!(p.name, "Caneca");
        assert_eq!(p.description.as_deref(), Some("azul"));
        assert_eq!(p.price, Decimal::new(1000, 2));
    }

    #[test]
    fn explicit_null_clears_description() {
        let mut p = product();
        ProductPatch { description: Some(None), ..Default::default() }.apply_to(&mut p);
        assert_eq!(p.description, None);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn product_view_embeds_owner_without_password() {
        let owner = user::Model {
            id: 7,
            name: "Ana".into(),
            email: "a@x.com".into(),
            password: "secret-hash".into(),
            created_at: Utc::now().into(),
        };
        let store = store::Model { id: 3, name: "Loja".into(), description: None, user_id: 7, created_at: Utc::now().into() };
        let view = ProductView::new(product(), store, &owner);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["storeId"], 1);
        assert_eq!(json["price"].as_f64(), Some(10.0));
        assert_eq!(json["store"]["userId"], 7);
        assert_eq!(json["store"]["user"]["email"], "a@x.com");
        assert!(json["store"]["user"].get("password").is_none());
        assert!(json["store"]["user"].get("createdAt").is_none());
    }
}
