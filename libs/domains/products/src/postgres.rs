use async_trait::async_trait;
use database::{BaseRepository, DatabaseError};
use resource::{RecordStore, StoreError};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity;

/// PostgreSQL-backed product store
#[derive(Clone)]
pub struct PgProductStore {
    base: BaseRepository<entity::Entity>,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Every column set; a non-positive id is left for the sequence to assign.
fn active_model(record: entity::Model) -> entity::ActiveModel {
    entity::ActiveModel {
        id: if record.id > 0 { Set(record.id) } else { NotSet },
        name: Set(record.name),
        description: Set(record.description),
        price: Set(record.price),
        stock: Set(record.stock),
        created_at: Set(record.created_at),
    }
}

#[async_trait]
impl RecordStore<entity::Model> for PgProductStore {
    async fn find_all(&self) -> Result<Vec<entity::Model>, StoreError> {
        Ok(self.base.find_all_ordered(entity::Column::Id).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<entity::Model>, StoreError> {
        Ok(self.base.find_by_id(id).await?)
    }

    async fn find_by_unique(&self, name: &str) -> Result<Option<entity::Model>, StoreError> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(self.base.db())
            .await
            .map_err(DatabaseError::from)?;
        Ok(model)
    }

    async fn insert(&self, record: entity::Model) -> Result<entity::Model, StoreError> {
        let model = self.base.insert(active_model(record)).await?;
        tracing::info!(product_id = model.id, "Created product");
        Ok(model)
    }

    async fn update(&self, record: entity::Model) -> Result<entity::Model, StoreError> {
        let model = self.base.update(active_model(record)).await?;
        tracing::info!(product_id = model.id, "Updated product");
        Ok(model)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        let affected = self.base.delete_by_id(id).await?;
        if affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use resource::{ResourceError, ResourceService};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::models::{CreateProduct, PatchProduct, Product};

    fn row(id: i32, name: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            price: "12.50".parse().unwrap(),
            stock: 3,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_unpersisted_record_leaves_id_to_database() {
        let active = active_model(row(0, "Chair"));
        assert_eq!(active.id, NotSet);

        let active = active_model(row(4, "Chair"));
        assert_eq!(active.id, Set(4));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Chair")]])
            .into_connection();
        let store = PgProductStore::new(db);

        let found = store.find_by_id(1).await.unwrap();
        assert_eq!(found.map(|m| m.name), Some("Chair".to_string()));
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = ResourceService::<Product, _>::new(PgProductStore::new(db));

        let err = service.delete(42).await.unwrap_err();
        assert_eq!(
            err,
            ResourceError::NotFound("Product with id 42 not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_with_taken_name_never_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Chair")]])
            .into_connection();
        let service = ResourceService::<Product, _>::new(PgProductStore::new(db));

        let err = service
            .create(CreateProduct {
                name: "Chair".to_string(),
                description: None,
                price: "5".parse().unwrap(),
                stock: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::Conflict(ref msg) if msg.contains("'Chair'")));
    }

    #[tokio::test]
    async fn test_patch_of_row_deleted_meanwhile_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, "Chair")], vec![]])
            .into_connection();
        let service = ResourceService::<Product, _>::new(PgProductStore::new(db));

        let err = service
            .partial_update(
                5,
                PatchProduct {
                    stock: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ResourceError::NotFound("Product with id 5 not found".to_string())
        );
    }
}
