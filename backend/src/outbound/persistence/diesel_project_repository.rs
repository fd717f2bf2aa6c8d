//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Listings are keyset-paginated: the cursor key's sort value, creation time
//! and id select the rows strictly after the previous page, matching the
//! `(rank desc, created_at desc, id desc)` indexes created by the
//! migrations. Deleting a posting relies on `ON DELETE CASCADE` to remove
//! its like and application records.

use std::collections::HashMap;
use std::fmt::Display;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{ProjectListQuery, ProjectRepository, ProjectRepositoryError};
use crate::domain::{
    Project, ProjectCursorKey, ProjectId, ProjectRecord, RecruitmentPosition, SearchFilter,
    SortOrder, UserId,
};

use super::diesel_basic_error_mapping::{
    counter_from_db, counter_to_db, is_unique_violation, map_basic_diesel_error,
    map_basic_pool_error,
};
use super::models::{NewProjectRow, ProjectRow, ProjectUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

type BoxedProjects<'a> = projects::BoxedQuery<'a, Pg>;

/// Diesel-backed implementation of the `ProjectRepository` port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    map_basic_pool_error(error, ProjectRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_basic_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn corrupted(field: &str, error: impl Display) -> ProjectRepositoryError {
    ProjectRepositoryError::query(format!("corrupted {field} in database: {error}"))
}

pub(super) fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let recruitment: Vec<RecruitmentPosition> =
        serde_json::from_value(row.recruitment).map_err(|err| corrupted("recruitment", err))?;
    let record = ProjectRecord {
        id: ProjectId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        title: row.title,
        summary: row.summary,
        description: row.description,
        category: row
            .category
            .parse()
            .map_err(|err| corrupted("category", err))?,
        workflow: row
            .workflow
            .parse()
            .map_err(|err| corrupted("workflow", err))?,
        tech_stack: row.tech_stack,
        recruitment,
        team_size: u16::try_from(row.team_size).map_err(|err| corrupted("team_size", err))?,
        duration: row.duration,
        contact_url: row.contact_url,
        status: row.status.parse().map_err(|err| corrupted("status", err))?,
        like_count: counter_from_db(row.like_count),
        view_count: counter_from_db(row.view_count),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Project::from_record(record).map_err(|err| corrupted("project", err))
}

fn recruitment_json(project: &Project) -> Result<serde_json::Value, ProjectRepositoryError> {
    serde_json::to_value(project.recruitment().positions())
        .map_err(|err| ProjectRepositoryError::query(format!("encode recruitment: {err}")))
}

fn apply_filter<'a>(mut query: BoxedProjects<'a>, filter: &SearchFilter) -> BoxedProjects<'a> {
    if let Some(category) = filter.category {
        query = query.filter(projects::category.eq(category.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(projects::status.eq(status.as_str()));
    }
    if let Some(workflow) = filter.workflow {
        query = query.filter(projects::workflow.eq(workflow.as_str()));
    }
    if let Some(position) = filter.position {
        query = query.filter(
            projects::recruitment.contains(json!([{ "position": position.as_str() }])),
        );
    }
    query
}

fn rank_to_db(rank: i64) -> i32 {
    i32::try_from(rank.clamp(0, i64::from(i32::MAX))).unwrap_or(i32::MAX)
}

fn after_cursor<'a>(query: BoxedProjects<'a>, key: &ProjectCursorKey) -> BoxedProjects<'a> {
    let older = projects::created_at.lt(key.created_at).or(projects::created_at
        .eq(key.created_at)
        .and(projects::id.lt(key.id)));
    let rank = rank_to_db(key.rank);
    match key.sort {
        SortOrder::Latest => query.filter(older),
        SortOrder::Popular => query.filter(
            projects::like_count
                .lt(rank)
                .or(projects::like_count.eq(rank).and(older)),
        ),
        SortOrder::Views => query.filter(
            projects::view_count
                .lt(rank)
                .or(projects::view_count.eq(rank).and(older)),
        ),
    }
}

fn ordered(query: BoxedProjects<'_>, sort: SortOrder) -> BoxedProjects<'_> {
    match sort {
        SortOrder::Latest => query.order((projects::created_at.desc(), projects::id.desc())),
        SortOrder::Popular => query.order((
            projects::like_count.desc(),
            projects::created_at.desc(),
            projects::id.desc(),
        )),
        SortOrder::Views => query.order((
            projects::view_count.desc(),
            projects::created_at.desc(),
            projects::id.desc(),
        )),
    }
}

fn rows_to_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>, ProjectRepositoryError> {
    rows.into_iter().map(row_to_project).collect()
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProjectRow {
            id: *project.id().as_uuid(),
            owner_id: *project.owner_id().as_uuid(),
            title: project.title().as_ref(),
            summary: project.summary(),
            description: project.description(),
            category: project.category().as_str(),
            workflow: project.workflow().as_str(),
            tech_stack: project.tech_stack().tags(),
            recruitment: recruitment_json(project)?,
            team_size: i32::from(project.team_size()),
            duration: project.duration(),
            contact_url: project.contact_url().map(AsRef::as_ref),
            status: project.status().as_str(),
            like_count: counter_to_db(project.like_count()),
            view_count: counter_to_db(project.view_count()),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        };

        diesel::insert_into(projects::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ProjectRepositoryError::duplicate(project.id().to_string())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn save(&self, project: &Project) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = ProjectUpdate {
            title: project.title().as_ref(),
            summary: project.summary(),
            description: project.description(),
            category: project.category().as_str(),
            workflow: project.workflow().as_str(),
            tech_stack: project.tech_stack().tags(),
            recruitment: recruitment_json(project)?,
            team_size: i32::from(project.team_size()),
            duration: project.duration(),
            contact_url: project.contact_url().map(AsRef::as_ref),
            status: project.status().as_str(),
            updated_at: project.updated_at(),
        };

        let updated = diesel::update(projects::table.find(project.id().as_uuid()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProjectRow> = projects::table
            .find(id.as_uuid())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn record_view(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProjectRow> = diesel::update(projects::table.find(id.as_uuid()))
            .set(projects::view_count.eq(projects::view_count + 1))
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(projects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(&self, query: &ProjectListQuery) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut statement = apply_filter(projects::table.into_boxed(), &query.filter);
        if let Some(after) = &query.after {
            statement = after_cursor(statement, after);
        }
        let rows: Vec<ProjectRow> = ordered(statement, query.filter.sort)
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_projects(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .order((projects::created_at.desc(), projects::id.desc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_projects(rows)
    }

    async fn find_many(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::id.eq_any(uuids))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_id: HashMap<Uuid, ProjectRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        ids.iter()
            .filter_map(|id| by_id.remove(id.as_uuid()))
            .map(row_to_project)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; query behaviour is exercised against the
    //! in-memory store, which shares the port contract.
    use super::*;
    use crate::test_support::fixture_now;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Study buddy matcher".to_owned(),
            summary: "Pairs people preparing for the same exam".to_owned(),
            description: "Weekly check-ins and shared notes.".to_owned(),
            category: "study".to_owned(),
            workflow: "hybrid".to_owned(),
            tech_stack: vec!["rust".to_owned(), "react".to_owned()],
            recruitment: json!([
                { "position": "backend", "headcount": 2 },
                { "position": "designer", "headcount": 1 },
            ]),
            team_size: 4,
            duration: "3 months".to_owned(),
            contact_url: None,
            status: "recruiting".to_owned(),
            like_count: 7,
            view_count: 40,
            created_at: fixture_now(),
            updated_at: fixture_now(),
        }
    }

    #[rstest]
    fn row_converts_to_project(row: ProjectRow) {
        let project = row_to_project(row).expect("valid row");
        assert_eq!(project.title().as_ref(), "Study buddy matcher");
        assert_eq!(project.like_count(), 7);
        assert_eq!(project.recruitment().positions().len(), 2);
    }

    #[rstest]
    fn unknown_category_is_reported_as_corruption(mut row: ProjectRow) {
        row.category = "hackathon".to_owned();
        let err = row_to_project(row).expect_err("corrupted category");
        assert!(matches!(err, ProjectRepositoryError::Query { .. }));
        assert!(err.to_string().contains("category"));
    }

    #[rstest]
    fn malformed_recruitment_is_reported_as_corruption(mut row: ProjectRow) {
        row.recruitment = json!({ "position": "backend" });
        let err = row_to_project(row).expect_err("corrupted recruitment");
        assert!(err.to_string().contains("recruitment"));
    }

    #[rstest]
    fn recruitment_round_trips_through_json(row: ProjectRow) {
        let stored = row.recruitment.clone();
        let project = row_to_project(row).expect("valid row");
        assert_eq!(recruitment_json(&project).expect("encode"), stored);
    }

    #[rstest]
    #[case(-5, 0)]
    #[case(12, 12)]
    #[case(i64::MAX, i32::MAX)]
    fn cursor_rank_is_clamped_to_column_range(#[case] rank: i64, #[case] expected: i32) {
        assert_eq!(rank_to_db(rank), expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, ProjectRepositoryError::Connection { .. }));
    }
}
