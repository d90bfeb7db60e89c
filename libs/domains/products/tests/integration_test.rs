//! Integration tests for the Products domain
//!
//! These run the PostgreSQL store against a real database via
//! testcontainers to check:
//! - Column mapping, including `NUMERIC(10,2)` prices
//! - The unique index on `name`
//! - Affected-row counts on delete
//!
//! They need Docker: `cargo test -p domain_products -- --ignored`.

use domain_products::*;
use resource::{RecordStore, ResourceError, StoreError, StoredRecord};
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(name: String, price: &str, stock: i32) -> CreateProduct {
    CreateProduct {
        name,
        description: Some("Integration test product".to_string()),
        price: price.parse().unwrap(),
        stock,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_product() {
    let db = TestDatabase::new().await;
    let service = ProductsService::new(PgProductStore::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("create_and_find");

    let created = service
        .create(input(builder.name("product", "main"), "19.99", 4))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.price, 19.99);
    assert_eq!(
        created.description.as_deref(),
        Some("Integration test product")
    );

    let fetched = service.find_one(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_surfaces_as_store_violation() {
    let db = TestDatabase::new().await;
    let store = PgProductStore::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_index");

    let name = builder.name("product", "dup");
    let record = entity::Model {
        id: 0,
        name: name.clone(),
        description: None,
        price: Decimal::ONE,
        stock: 1,
        created_at: chrono::Utc::now().into(),
    };

    store.insert(record.clone()).await.unwrap();
    let err = store.insert(record).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));

    let found = assert_some(store.find_by_unique(&name).await.unwrap(), "stored product");
    assert_eq!(found.unique_key(), name);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_partial_update_and_delete() {
    let db = TestDatabase::new().await;
    let service = ProductsService::new(PgProductStore::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("update_and_delete");

    let created = service
        .create(input(builder.name("product", "main"), "5.00", 1))
        .await
        .unwrap();

    let updated = service
        .partial_update(
            created.id,
            PatchProduct {
                stock: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.stock, 9);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.created_at, created.created_at);

    service.delete(created.id).await.unwrap();
    let err = service.find_one(created.id).await.unwrap_err();
    assert!(matches!(err, ResourceError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_renaming_onto_taken_name_is_conflict() {
    let db = TestDatabase::new().await;
    let service = ProductsService::new(PgProductStore::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("rename_conflict");

    let first = service
        .create(input(builder.name("product", "a"), "1", 1))
        .await
        .unwrap();
    let second = service
        .create(input(builder.name("product", "b"), "1", 1))
        .await
        .unwrap();

    let err = service
        .partial_update(
            second.id,
            PatchProduct {
                name: Some(first.name.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ids_restart_after_truncate() {
    let db = TestDatabase::new().await;
    let service = ProductsService::new(PgProductStore::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("truncate");

    service
        .create(input(builder.name("product", "old"), "1", 1))
        .await
        .unwrap();
    db.truncate("products").await;
    assert!(service.find_all().await.unwrap().is_empty());

    let fresh = service
        .create(input(builder.name("product", "old"), "1", 1))
        .await
        .unwrap();
    assert_eq!(fresh.id, 1);
}
