use async_trait::async_trait;
use database::{BaseRepository, DatabaseError};
use resource::{RecordStore, StoreError};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity;

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    base: BaseRepository<entity::Entity>,
}

impl PgUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn active_model(record: entity::Model) -> entity::ActiveModel {
    entity::ActiveModel {
        id: if record.id > 0 { Set(record.id) } else { NotSet },
        name: Set(record.name),
        email: Set(record.email),
        password_hash: Set(record.password_hash),
        created_at: Set(record.created_at),
    }
}

#[async_trait]
impl RecordStore<entity::Model> for PgUserStore {
    async fn find_all(&self) -> Result<Vec<entity::Model>, StoreError> {
        Ok(self.base.find_all_ordered(entity::Column::Id).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<entity::Model>, StoreError> {
        Ok(self.base.find_by_id(id).await?)
    }

    async fn find_by_unique(&self, email: &str) -> Result<Option<entity::Model>, StoreError> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(self.base.db())
            .await
            .map_err(DatabaseError::from)?;
        Ok(model)
    }

    async fn insert(&self, record: entity::Model) -> Result<entity::Model, StoreError> {
        let model = self.base.insert(active_model(record)).await?;
        tracing::info!(user_id = model.id, "Created user");
        Ok(model)
    }

    async fn update(&self, record: entity::Model) -> Result<entity::Model, StoreError> {
        let model = self.base.update(active_model(record)).await?;
        tracing::info!(user_id = model.id, "Updated user");
        Ok(model)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        let affected = self.base.delete_by_id(id).await?;
        if affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(id: i32, email: &str) -> entity::Model {
        entity::Model {
            id,
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_unique_matches_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "ada@example.com")]])
            .into_connection();
        let store = PgUserStore::new(db);

        let found = store.find_by_unique("ada@example.com").await.unwrap();
        assert_eq!(found.map(|m| m.id), Some(3));
    }

    #[tokio::test]
    async fn test_find_all_returns_rows_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "a@example.com"), row(2, "b@example.com")]])
            .into_connection();
        let store = PgUserStore::new(db);

        let ids: Vec<i32> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
