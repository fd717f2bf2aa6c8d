//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.

use std::fmt::Display;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationMessage, AssociationKey, ProjectId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::ApplicationRow;
use super::pool::{DbPool, PoolError};
use super::schema::{applications, projects};

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_basic_pool_error(error, ApplicationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_basic_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

fn corrupted(field: &str, error: impl Display) -> ApplicationRepositoryError {
    ApplicationRepositoryError::query(format!("corrupted {field} in database: {error}"))
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    Ok(Application {
        key: AssociationKey::new(
            UserId::from_uuid(row.user_id),
            ProjectId::from_uuid(row.project_id),
        ),
        position: row
            .position
            .parse()
            .map_err(|err| corrupted("position", err))?,
        message: ApplicationMessage::new(&row.message).map_err(|err| corrupted("message", err))?,
        created_at: row.created_at,
    })
}

fn application_to_row(application: &Application) -> ApplicationRow {
    ApplicationRow {
        user_id: *application.key.user_id().as_uuid(),
        project_id: *application.key.project_id().as_uuid(),
        position: application.position.as_str().to_owned(),
        message: application.message.as_ref().to_owned(),
        created_at: application.created_at,
    }
}

fn key_columns(key: &AssociationKey) -> (Uuid, Uuid) {
    (*key.user_id().as_uuid(), *key.project_id().as_uuid())
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let row = application_to_row(application);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Hold a share lock on the posting so a concurrent delete cannot slip
        // between the existence check and the insert.
        let inserted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let posting: Option<Uuid> = projects::table
                        .find(row.project_id)
                        .select(projects::id)
                        .for_share()
                        .first(conn)
                        .await
                        .optional()?;
                    if posting.is_none() {
                        return Ok(false);
                    }
                    diesel::insert_into(applications::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ApplicationRepositoryError::duplicate(application.key.to_string())
                } else {
                    map_diesel_error(err)
                }
            })?;

        if inserted {
            Ok(())
        } else {
            Err(ApplicationRepositoryError::query(format!(
                "project {} no longer exists",
                application.key.project_id()
            )))
        }
    }

    async fn delete(&self, key: &AssociationKey) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(applications::table.find(key_columns(key)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find(
        &self,
        key: &AssociationKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ApplicationRow> = applications::table
            .find(key_columns(key))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn list_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ApplicationRow> = applications::table
            .filter(applications::project_id.eq(project.as_uuid()))
            .order((applications::created_at.asc(), applications::user_id.asc()))
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_application).collect()
    }

    async fn applied_project_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ProjectId>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = applications::table
            .filter(applications::user_id.eq(user.as_uuid()))
            .order((
                applications::created_at.desc(),
                applications::project_id.desc(),
            ))
            .select(applications::project_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(ProjectId::from_uuid).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;
    use crate::test_support::fixture_now;
    use rstest::rstest;

    fn application() -> Application {
        Application {
            key: AssociationKey::new(UserId::random(), ProjectId::random()),
            position: Position::Designer,
            message: ApplicationMessage::new("I design onboarding flows").expect("message"),
            created_at: fixture_now(),
        }
    }

    #[rstest]
    fn rows_convert_back_to_the_same_application() {
        let original = application();
        let restored = row_to_application(application_to_row(&original)).expect("valid row");
        assert_eq!(restored, original);
    }

    #[rstest]
    fn empty_stored_message_is_corruption() {
        let mut row = application_to_row(&application());
        row.message = String::new();
        let err = row_to_application(row).expect_err("corrupted message");
        assert!(err.to_string().contains("message"));
    }

    #[rstest]
    fn unique_violation_is_detected() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
