use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, PrimaryKeyTrait};

use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

/// Classify a SeaORM error, surfacing uniqueness violations as constraint
/// errors so handlers can answer 409 instead of 500.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    let text = err.to_string();
    if text.contains("duplicate") || text.contains("unique") {
        RepoError::Constraint("uniqueness constraint violated".to_string())
    } else {
        RepoError::Query(text)
    }
}

/// CRUD over one SeaORM entity, shared by all concrete repositories.
///
/// Primary keys are client-generated UUIDs, which is why the port splits
/// `insert` from `update`: a set primary key cannot tell SeaORM whether
/// the row is new.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    marker: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            marker: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let row = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(row.map(T::from))
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let active: E::ActiveModel = entity.into();
        let row = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let active: E::ActiveModel = entity.into();
        let row = active.update(&self.db).await.map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let outcome = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if outcome.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
