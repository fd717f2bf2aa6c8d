//! PostgreSQL-backed `UserProfileRepository` implementation using Diesel ORM.

use std::collections::HashMap;
use std::fmt::Display;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{
    DisplayName, Email, Introduction, UserId, UserProfile, UserProfileRecord, WebUrl,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `UserProfileRepository` port.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_basic_pool_error(error, UserProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_basic_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn corrupted(field: &str, error: impl Display) -> UserProfileRepositoryError {
    UserProfileRepositoryError::query(format!("corrupted {field} in database: {error}"))
}

fn row_to_profile(row: ProfileRow) -> Result<UserProfile, UserProfileRepositoryError> {
    let record = UserProfileRecord {
        id: UserId::from_uuid(row.id),
        display_name: DisplayName::new(row.display_name)
            .map_err(|err| corrupted("display_name", err))?,
        email: Email::new(row.email).map_err(|err| corrupted("email", err))?,
        photo_url: row
            .photo_url
            .map(WebUrl::new)
            .transpose()
            .map_err(|err| corrupted("photo_url", err))?,
        position: row
            .position
            .map(|value| value.parse())
            .transpose()
            .map_err(|err| corrupted("position", err))?,
        experience: row
            .experience
            .map(|value| value.parse())
            .transpose()
            .map_err(|err| corrupted("experience", err))?,
        introduction: Introduction::new(row.introduction)
            .map_err(|err| corrupted("introduction", err))?,
        onboarded: row.onboarded,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(UserProfile::from_record(record))
}

fn new_row(profile: &UserProfile) -> NewProfileRow<'_> {
    NewProfileRow {
        id: *profile.id().as_uuid(),
        display_name: profile.display_name().as_ref(),
        email: profile.email().as_ref(),
        photo_url: profile.photo_url().map(AsRef::as_ref),
        position: profile.position().map(|position| position.as_str()),
        experience: profile.experience().map(|tier| tier.as_str()),
        introduction: profile.introduction().as_ref(),
        onboarded: profile.onboarded(),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn save(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = new_row(profile);

        diesel::insert_into(profiles::table)
            .values(&row)
            .on_conflict(profiles::id)
            .do_update()
            .set((
                profiles::display_name.eq(excluded(profiles::display_name)),
                profiles::email.eq(excluded(profiles::email)),
                profiles::photo_url.eq(excluded(profiles::photo_url)),
                profiles::position.eq(excluded(profiles::position)),
                profiles::experience.eq(excluded(profiles::experience)),
                profiles::introduction.eq(excluded(profiles::introduction)),
                profiles::onboarded.eq(excluded(profiles::onboarded)),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<UserProfile, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(profiles::table)
            .values(&new_row(profile))
            .on_conflict(profiles::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row: ProfileRow = profiles::table
            .find(profile.id().as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_profile(row)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .find(id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn find_many(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ProfileRow> = profiles::table
            .filter(profiles::id.eq_any(uuids))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_id: HashMap<Uuid, ProfileRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        ids.iter()
            .filter_map(|id| by_id.remove(id.as_uuid()))
            .map(row_to_profile)
            .collect()
    }
}
