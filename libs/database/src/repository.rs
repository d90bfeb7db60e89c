//! Generic single-entity access on top of SeaORM.
//!
//! Domain stores wrap a [`BaseRepository`] for the id-keyed operations and
//! build their own queries for anything else through [`BaseRepository::db`].

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryOrder,
};

use crate::common::DatabaseResult;

pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Every row, ordered by `order_column` ascending
    pub async fn find_all_ordered<C>(&self, order_column: C) -> DatabaseResult<Vec<E::Model>>
    where
        C: ColumnTrait,
    {
        Ok(E::find().order_by_asc(order_column).all(&self.db).await?)
    }

    pub async fn find_by_id<K>(&self, id: K) -> DatabaseResult<Option<E::Model>>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        Ok(E::find_by_id(id).one(&self.db).await?)
    }

    /// Insert and return the stored row, including generated columns
    pub async fn insert(&self, model: E::ActiveModel) -> DatabaseResult<E::Model> {
        Ok(model.insert(&self.db).await?)
    }

    /// Write the set columns of an existing row
    pub async fn update(&self, model: E::ActiveModel) -> DatabaseResult<E::Model> {
        Ok(model.update(&self.db).await?)
    }

    /// Delete by primary key, returning the number of rows removed
    pub async fn delete_by_id<K>(&self, id: K) -> DatabaseResult<u64>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
