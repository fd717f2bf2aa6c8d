//! Request and response bodies for the project posting endpoints.
//!
//! Keywords (category, workflow, status, position, sort) travel as plain
//! strings and are parsed here so an unknown value is reported against the
//! field that carried it.

use chrono::{DateTime, Utc};
use pagination::{Page, PageParams, PaginationLinks};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::validation::{FieldName, parse_keyword, parse_optional_keyword};
use crate::domain::dates::{format_date, format_relative};
use crate::domain::ports::{ListProjectsRequest, ProjectSlice, SliceRequest};
use crate::domain::{
    Error, Project, ProjectDraft, ProjectPatch, RecruitmentPosition, SearchFilter, SortOrder,
};

const CATEGORY: FieldName = FieldName::new("category");
const WORKFLOW: FieldName = FieldName::new("workflow");
const STATUS: FieldName = FieldName::new("status");
const POSITION: FieldName = FieldName::new("position");
const RECRUITMENT: FieldName = FieldName::new("recruitment");
const SORT: FieldName = FieldName::new("sort");

/// One recruited position in a request or response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentBody {
    #[schema(example = "backend")]
    pub position: String,
    #[schema(example = 2)]
    pub headcount: u16,
}

impl RecruitmentBody {
    fn parse(self) -> Result<RecruitmentPosition, Error> {
        Ok(RecruitmentPosition {
            position: parse_keyword(RECRUITMENT, &self.position)?,
            headcount: self.headcount,
        })
    }
}

impl From<&RecruitmentPosition> for RecruitmentBody {
    fn from(value: &RecruitmentPosition) -> Self {
        Self {
            position: value.position.as_str().to_owned(),
            headcount: value.headcount,
        }
    }
}

fn parse_recruitment(entries: Vec<RecruitmentBody>) -> Result<Vec<RecruitmentPosition>, Error> {
    entries.into_iter().map(RecruitmentBody::parse).collect()
}

/// Body of `POST /api/v1/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProjectBody {
    #[schema(example = "Study buddy matcher")]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub description: String,
    #[schema(example = "side_project")]
    pub category: String,
    #[schema(example = "online")]
    pub workflow: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub recruitment: Vec<RecruitmentBody>,
    #[schema(example = 4)]
    pub team_size: u16,
    #[serde(default)]
    #[schema(example = "3 months")]
    pub duration: String,
    #[serde(default)]
    pub contact_url: Option<String>,
}

impl TryFrom<CreateProjectBody> for ProjectDraft {
    type Error = Error;

    fn try_from(body: CreateProjectBody) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_keyword(CATEGORY, &body.category)?,
            workflow: parse_keyword(WORKFLOW, &body.workflow)?,
            recruitment: parse_recruitment(body.recruitment)?,
            title: body.title,
            summary: body.summary,
            description: body.description,
            tech_stack: body.tech_stack,
            team_size: body.team_size,
            duration: body.duration,
            contact_url: body.contact_url,
        })
    }
}

/// Body of `PATCH /api/v1/projects/{id}`; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchProjectBody {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub workflow: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub recruitment: Option<Vec<RecruitmentBody>>,
    pub team_size: Option<u16>,
    pub duration: Option<String>,
    pub contact_url: Option<String>,
    #[schema(example = "closed")]
    pub status: Option<String>,
}

impl TryFrom<PatchProjectBody> for ProjectPatch {
    type Error = Error;

    fn try_from(body: PatchProjectBody) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_optional_keyword(CATEGORY, body.category.as_deref())?,
            workflow: parse_optional_keyword(WORKFLOW, body.workflow.as_deref())?,
            status: parse_optional_keyword(STATUS, body.status.as_deref())?,
            recruitment: body.recruitment.map(parse_recruitment).transpose()?,
            title: body.title,
            summary: body.summary,
            description: body.description,
            tech_stack: body.tech_stack,
            team_size: body.team_size,
            duration: body.duration,
            contact_url: body.contact_url,
        })
    }
}

/// Query string of `GET /api/v1/projects`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProjectsQuery {
    /// `side_project`, `study`, `contest` or `startup`.
    pub category: Option<String>,
    /// Only postings recruiting this position.
    pub position: Option<String>,
    /// `recruiting` or `closed`.
    pub status: Option<String>,
    /// `online`, `offline` or `hybrid`.
    pub workflow: Option<String>,
    /// `latest` (default), `popular` or `views`.
    pub sort: Option<String>,
    /// Opaque cursor from a previous page's `nextCursor`.
    pub cursor: Option<String>,
    /// Page size, clamped to 1..=100; defaults to 12.
    pub limit: Option<usize>,
}

impl TryFrom<ListProjectsQuery> for ListProjectsRequest {
    type Error = Error;

    fn try_from(query: ListProjectsQuery) -> Result<Self, Self::Error> {
        let filter = SearchFilter {
            category: parse_optional_keyword(CATEGORY, query.category.as_deref())?,
            position: parse_optional_keyword(POSITION, query.position.as_deref())?,
            status: parse_optional_keyword(STATUS, query.status.as_deref())?,
            workflow: parse_optional_keyword(WORKFLOW, query.workflow.as_deref())?,
            sort: parse_optional_keyword::<SortOrder>(SORT, query.sort.as_deref())?
                .unwrap_or_default(),
        };
        Ok(Self {
            filter,
            page: PageParams {
                cursor: query.cursor,
                limit: query.limit,
            },
        })
    }
}

/// Query string of the page-numbered profile listings.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SliceQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<usize>,
    /// Items per page, clamped to 1..=100; defaults to 12.
    pub size: Option<usize>,
}

impl From<SliceQuery> for SliceRequest {
    fn from(query: SliceQuery) -> Self {
        Self::new(query.page, query.size)
    }
}

/// A project posting as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[schema(format = Uuid)]
    pub id: String,
    #[schema(format = Uuid)]
    pub owner_id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    pub workflow: String,
    pub tech_stack: Vec<String>,
    pub recruitment: Vec<RecruitmentBody>,
    pub team_size: u16,
    pub duration: String,
    pub contact_url: Option<String>,
    pub status: String,
    pub like_count: u32,
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Posting date as `YYYY.MM.DD`.
    #[schema(example = "2026.05.20")]
    pub posted_on: String,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            owner_id: project.owner_id().to_string(),
            title: project.title().to_string(),
            summary: project.summary().to_owned(),
            description: project.description().to_owned(),
            category: project.category().as_str().to_owned(),
            workflow: project.workflow().as_str().to_owned(),
            tech_stack: project.tech_stack().tags().to_vec(),
            recruitment: project
                .recruitment()
                .positions()
                .iter()
                .map(RecruitmentBody::from)
                .collect(),
            team_size: project.team_size(),
            duration: project.duration().to_owned(),
            contact_url: project.contact_url().map(|url| url.to_string()),
            status: project.status().as_str().to_owned(),
            like_count: project.like_count(),
            view_count: project.view_count(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
            posted_on: format_date(project.created_at()),
        }
    }
}

/// A posting together with the caller's like state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// Whether the signed-in caller likes the posting; absent when signed
    /// out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    /// Age of the posting, e.g. `3 hours ago`; a plain date after a week.
    #[schema(example = "3 hours ago")]
    pub posted_ago: String,
}

impl ProjectDetailResponse {
    /// Describe `project` as seen at `now`.
    #[must_use]
    pub fn new(project: &Project, liked: Option<bool>, now: DateTime<Utc>) -> Self {
        Self {
            project: ProjectResponse::from(project),
            liked,
            posted_ago: format_relative(project.created_at(), now),
        }
    }
}

/// Navigation links for a cursor page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageLinksResponse {
    #[serde(rename = "self")]
    pub current: String,
    pub next: Option<String>,
}

impl From<PaginationLinks> for PageLinksResponse {
    fn from(links: PaginationLinks) -> Self {
        Self {
            current: links.current,
            next: links.next,
        }
    }
}

/// One cursor page of postings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPageResponse {
    pub items: Vec<ProjectResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub links: PageLinksResponse,
}

impl ProjectPageResponse {
    pub(crate) fn new(page: &Page<Project>, links: PaginationLinks) -> Self {
        Self {
            items: page.items.iter().map(ProjectResponse::from).collect(),
            next_cursor: page.next_cursor.clone(),
            has_more: page.has_more,
            links: links.into(),
        }
    }
}

/// One numbered page of postings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSliceResponse {
    pub items: Vec<ProjectResponse>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl From<&ProjectSlice> for ProjectSliceResponse {
    fn from(slice: &ProjectSlice) -> Self {
        Self {
            items: slice.items.iter().map(ProjectResponse::from).collect(),
            page: slice.page,
            size: slice.size,
            total_items: slice.total_items,
            total_pages: slice.total_pages,
        }
    }
}
