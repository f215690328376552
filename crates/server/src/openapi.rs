//! OpenAPI document. The `*Doc`/`*Request` types only describe wire shapes;
//! handlers use the service-layer types.

use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct ServiceIdentityDoc { pub ok: bool, pub service: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct CreateUserRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserDoc { pub id: i32, pub name: String, pub email: String, pub created_at: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateStoreRequest { pub name: String, pub description: Option<String>, pub user_id: i32 }

#[derive(ToSchema)]
pub struct UpdateStoreRequest { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct StoreDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: String,
    pub user: UserDoc,
    pub products: Option<Vec<ProductRowDoc>>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductRowDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Decimal with two fractional digits.
    pub price: f64,
    pub stock: i32,
    pub store_id: i32,
    pub created_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub store_id: i32,
    pub created_at: String,
    pub store: StoreDoc,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<i32>,
    pub store_id: i32,
}

#[derive(ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::root,
        crate::routes::health::status,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::stores::create,
        crate::routes::stores::get,
        crate::routes::stores::update,
        crate::routes::stores::delete,
        crate::routes::products::create,
        crate::routes::products::list,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            ServiceIdentityDoc,
            MessageDoc,
            ErrorDoc,
            CreateUserRequest,
            UserDoc,
            CreateStoreRequest,
            UpdateStoreRequest,
            StoreDoc,
            ProductRowDoc,
            ProductDoc,
            CreateProductRequest,
            UpdateProductRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "stores"),
        (name = "products")
    )
)]
pub struct ApiDoc;
