use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;

use service::catalog::domain::{CreateProductInput, CreateStoreInput, CreateUserInput};
use service::catalog::repository::mock::MockCatalogRepository;
use service::{ProductService, StoreService, UserService};

fn bench_product_listing(c: &mut Criterion) {
    let repo = Arc::new(MockCatalogRepository::default());
    let users = UserService::new(repo.clone());
    let stores = StoreService::new(repo.clone());
    let products = ProductService::new(repo.clone());

    // seed outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        for u in 1..=10 {
            users
                .create(CreateUserInput { name: Some(format!("User {u}")), email: Some(format!("u{u}@bench.io")), password: Some("bench".into()) })
                .await
                .unwrap();
            stores
                .create(CreateStoreInput { name: Some(format!("Store {u}")), description: None, user_id: Some(json!(u)) })
                .await
                .unwrap();
            for p in 0..50 {
                products
                    .create(CreateProductInput {
                        name: Some(format!("Item {p}")),
                        price: Some(json!(format!("{p}.99"))),
                        store_id: Some(json!(u)),
                        ..Default::default()
                    })
                    .await
                    .unwrap();
            }
        }
    });

    c.bench_function("product_list_500", |b| {
        b.iter(|| rt.block_on(products.list()).unwrap());
    });
    c.bench_function("store_get_with_products", |b| {
        b.iter(|| rt.block_on(stores.get("5")).unwrap());
    });
}

criterion_group!(benches, bench_product_listing);
criterion_main!(benches);
