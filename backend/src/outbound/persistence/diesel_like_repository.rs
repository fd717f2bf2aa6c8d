//! PostgreSQL-backed `LikeRepository` implementation using Diesel ORM.
//!
//! A toggle runs in one transaction that first locks the posting row, so
//! concurrent toggles on the same posting serialise and the like counter
//! always matches the number of like records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{LikeRepository, LikeRepositoryError};
use crate::domain::{AssociationKey, LikeToggle, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewLikeRow;
use super::pool::{DbPool, PoolError};
use super::schema::{likes, projects};

/// Diesel-backed implementation of the `LikeRepository` port.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LikeRepositoryError {
    map_basic_pool_error(error, LikeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LikeRepositoryError {
    map_basic_diesel_error(
        error,
        LikeRepositoryError::query,
        LikeRepositoryError::connection,
    )
}

fn like_key(key: &AssociationKey) -> (Uuid, Uuid) {
    (*key.user_id().as_uuid(), *key.project_id().as_uuid())
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn exists(&self, key: &AssociationKey) -> Result<bool, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<Uuid> = likes::table
            .find(like_key(key))
            .select(likes::project_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn toggle(
        &self,
        key: &AssociationKey,
        now: DateTime<Utc>,
    ) -> Result<LikeToggle, LikeRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let (user_id, project_id) = like_key(key);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let locked: Option<Uuid> = projects::table
                        .find(project_id)
                        .select(projects::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }

                    let removed = diesel::delete(likes::table.find((user_id, project_id)))
                        .execute(conn)
                        .await?;
                    if removed > 0 {
                        diesel::update(projects::table.find(project_id))
                            .filter(projects::like_count.gt(0))
                            .set(projects::like_count.eq(projects::like_count - 1))
                            .execute(conn)
                            .await?;
                        return Ok(Some(LikeToggle::Unliked));
                    }

                    diesel::insert_into(likes::table)
                        .values(&NewLikeRow {
                            user_id,
                            project_id,
                            created_at: now,
                        })
                        .execute(conn)
                        .await?;
                    diesel::update(projects::table.find(project_id))
                        .set(projects::like_count.eq(projects::like_count + 1))
                        .execute(conn)
                        .await?;
                    Ok(Some(LikeToggle::Liked))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        outcome.ok_or_else(|| LikeRepositoryError::missing_project(project_id.to_string()))
    }

    async fn liked_project_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ProjectId>, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = likes::table
            .filter(likes::user_id.eq(user.as_uuid()))
            .order((likes::created_at.desc(), likes::project_id.desc()))
            .select(likes::project_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(ProjectId::from_uuid).collect())
    }
}
