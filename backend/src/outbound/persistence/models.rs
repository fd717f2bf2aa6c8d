//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion to and from domain records
//! lives in the repository modules.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{applications, likes, profiles, projects};

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub introduction: String,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct used for profile upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub photo_url: Option<&'a str>,
    pub position: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub introduction: &'a str,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    pub workflow: String,
    pub tech_stack: Vec<String>,
    pub recruitment: serde_json::Value,
    pub team_size: i32,
    pub duration: String,
    pub contact_url: Option<String>,
    pub status: String,
    pub like_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new postings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub workflow: &'a str,
    pub tech_stack: &'a [String],
    pub recruitment: serde_json::Value,
    pub team_size: i32,
    pub duration: &'a str,
    pub contact_url: Option<&'a str>,
    pub status: &'a str,
    pub like_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for merge updates.
///
/// Counters are absent: they change only through like toggles and view
/// recording.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectUpdate<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub workflow: &'a str,
    pub tech_stack: &'a [String],
    pub recruitment: serde_json::Value,
    pub team_size: i32,
    pub duration: &'a str,
    pub contact_url: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Association records
// ---------------------------------------------------------------------------

/// Insertable struct for like records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the applications table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub position: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
