//! Integration tests for the Users domain against PostgreSQL
//!
//! They need Docker: `cargo test -p domain_users -- --ignored`.

use domain_users::password::verify_password;
use domain_users::*;
use resource::{RecordStore, ResourceError};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(builder: &TestDataBuilder, local: &str) -> CreateUser {
    CreateUser {
        name: builder.name("user", local),
        email: builder.email(local),
        password: "s3cret".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_password_is_stored_hashed() {
    let db = TestDatabase::new().await;
    let store = PgUserStore::new(db.connection());
    let service = UsersService::new(store.clone());
    let builder = TestDataBuilder::from_test_name("stored_hashed");

    let created = service.create(input(&builder, "ada")).await.unwrap();

    let row = assert_some(store.find_by_id(created.id).await.unwrap(), "stored user");
    assert_ne!(row.password_hash, "s3cret");
    assert!(verify_password("s3cret", &row.password_hash).unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_conflict() {
    let db = TestDatabase::new().await;
    let service = UsersService::new(PgUserStore::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("duplicate_email");

    service.create(input(&builder, "ada")).await.unwrap();
    let err = service.create(input(&builder, "ada")).await.unwrap_err();

    assert!(matches!(err, ResourceError::Conflict(_)));
    assert_eq!(service.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_full_update_replaces_password_only_when_given() {
    let db = TestDatabase::new().await;
    let store = PgUserStore::new(db.connection());
    let service = UsersService::new(store.clone());
    let builder = TestDataBuilder::from_test_name("full_update_password");

    let created = service.create(input(&builder, "ada")).await.unwrap();

    service
        .update(
            created.id,
            UpdateUser {
                name: "Ada".to_string(),
                email: created.email.clone(),
                password: None,
            },
        )
        .await
        .unwrap();
    let row = assert_some(store.find_by_id(created.id).await.unwrap(), "user");
    assert!(verify_password("s3cret", &row.password_hash).unwrap());

    service
        .update(
            created.id,
            UpdateUser {
                name: "Ada".to_string(),
                email: created.email.clone(),
                password: Some("n3w".to_string()),
            },
        )
        .await
        .unwrap();
    let row = assert_some(store.find_by_id(created.id).await.unwrap(), "user");
    assert!(verify_password("n3w", &row.password_hash).unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_missing_user_is_not_found() {
    let db = TestDatabase::new().await;
    let service = UsersService::new(PgUserStore::new(db.connection()));

    let err = service.delete(12345).await.unwrap_err();

    assert_eq!(
        err,
        ResourceError::NotFound("User with id 12345 not found".to_string())
    );
}
