//! Project postings.
//!
//! A posting is created in the `recruiting` state by its owner, edited with
//! merge semantics and eventually closed or deleted. Team size is free-form
//! and is not reconciled with the listed recruitment positions.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::keyword::keyword_enum;
use super::{Position, UserId, WebUrl, WebUrlError};

/// Maximum title length, in characters.
pub const TITLE_MAX: usize = 80;
/// Maximum summary length, in characters.
pub const SUMMARY_MAX: usize = 200;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX: usize = 5000;
/// Maximum expected-duration text length, in characters.
pub const DURATION_MAX: usize = 50;
/// Maximum number of tech stack tags.
pub const TECH_STACK_MAX: usize = 20;
/// Maximum length of one tech stack tag, in characters.
pub const TECH_TAG_MAX: usize = 30;
/// Largest team size a posting may advertise.
pub const TEAM_SIZE_MAX: u16 = 100;

/// Validation failures for project postings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("project id must be a valid UUID")]
    InvalidId,
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("summary must be at most {max} characters")]
    SummaryTooLong { max: usize },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("duration must be at most {max} characters")]
    DurationTooLong { max: usize },
    #[error("tech stack tags must not be empty")]
    EmptyTechTag { index: usize },
    #[error("tech stack tags must be at most {max} characters")]
    TechTagTooLong { index: usize, max: usize },
    #[error("tech stack may list at most {max} tags")]
    TooManyTechTags { max: usize },
    #[error("at least one recruitment position is required")]
    NoRecruitmentPositions,
    #[error("headcount for {position} must be at least 1")]
    ZeroHeadcount { position: Position },
    #[error("{position} is listed more than once")]
    DuplicatePosition { position: Position },
    #[error("team size must be between 1 and {max}")]
    TeamSizeOutOfRange { max: u16 },
    #[error("contact URL is invalid: {0}")]
    ContactUrl(#[from] WebUrlError),
}

impl ProjectValidationError {
    /// JSON field name the failure relates to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::SummaryTooLong { .. } => "summary",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::DurationTooLong { .. } => "duration",
            Self::EmptyTechTag { .. }
            | Self::TechTagTooLong { .. }
            | Self::TooManyTechTags { .. } => "techStack",
            Self::NoRecruitmentPositions
            | Self::ZeroHeadcount { .. }
            | Self::DuplicatePosition { .. } => "recruitment",
            Self::TeamSizeOutOfRange { .. } => "teamSize",
            Self::ContactUrl(_) => "contactUrl",
        }
    }
}

/// Stable project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Parse a project id from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ProjectValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ProjectId {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

keyword_enum! {
    /// Kind of project being recruited for.
    pub enum ProjectCategory {
        error = ParseProjectCategoryError,
        label = "category",
        SideProject => "side_project",
        Study => "study",
        Contest => "contest",
        Startup => "startup",
    }
}

keyword_enum! {
    /// How the team plans to meet.
    pub enum Workflow {
        error = ParseWorkflowError,
        label = "workflow",
        Online => "online",
        Offline => "offline",
        Hybrid => "hybrid",
    }
}

keyword_enum! {
    /// Recruitment state of a posting.
    pub enum ProjectStatus {
        error = ParseProjectStatusError,
        label = "status",
        /// Accepting applications.
        Recruiting => "recruiting",
        /// No longer accepting applications.
        Closed => "closed",
    }
}

/// Trimmed title of 1 to 80 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTitle(String);

impl ProjectTitle {
    /// Validate and construct a title.
    pub fn new(title: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(ProjectValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recruited position and how many people are wanted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentPosition {
    pub position: Position,
    pub headcount: u16,
}

/// Non-empty list of recruited positions with no repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitmentPlan(Vec<RecruitmentPosition>);

impl RecruitmentPlan {
    /// Validate a recruitment plan.
    pub fn new(positions: Vec<RecruitmentPosition>) -> Result<Self, ProjectValidationError> {
        if positions.is_empty() {
            return Err(ProjectValidationError::NoRecruitmentPositions);
        }
        let mut seen = HashSet::with_capacity(positions.len());
        for entry in &positions {
            if entry.headcount == 0 {
                return Err(ProjectValidationError::ZeroHeadcount {
                    position: entry.position,
                });
            }
            if !seen.insert(entry.position) {
                return Err(ProjectValidationError::DuplicatePosition {
                    position: entry.position,
                });
            }
        }
        Ok(Self(positions))
    }

    /// Whether the plan recruits for `position`.
    #[must_use]
    pub fn recruits(&self, position: Position) -> bool {
        self.0.iter().any(|entry| entry.position == position)
    }

    /// Planned positions in listing order.
    #[must_use]
    pub fn positions(&self) -> &[RecruitmentPosition] {
        &self.0
    }
}

/// Ordered, de-duplicated list of technology tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechStack(Vec<String>);

impl TechStack {
    /// Trim, validate and de-duplicate tags, keeping first occurrences.
    ///
    /// # Examples
    /// ```
    /// use jam_backend::domain::TechStack;
    ///
    /// let stack = TechStack::new(vec![" Rust ".into(), "React".into(), "Rust".into()])
    ///     .expect("valid tags");
    /// assert_eq!(stack.tags(), ["Rust", "React"]);
    /// ```
    pub fn new(tags: Vec<String>) -> Result<Self, ProjectValidationError> {
        let mut seen = HashSet::with_capacity(tags.len());
        let mut kept = Vec::with_capacity(tags.len());
        for (index, tag) in tags.into_iter().enumerate() {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                return Err(ProjectValidationError::EmptyTechTag { index });
            }
            if trimmed.chars().count() > TECH_TAG_MAX {
                return Err(ProjectValidationError::TechTagTooLong {
                    index,
                    max: TECH_TAG_MAX,
                });
            }
            if seen.insert(trimmed.to_owned()) {
                kept.push(trimmed.to_owned());
            }
        }
        if kept.len() > TECH_STACK_MAX {
            return Err(ProjectValidationError::TooManyTechTags {
                max: TECH_STACK_MAX,
            });
        }
        Ok(Self(kept))
    }

    /// Tags in listing order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.0
    }
}

/// Unvalidated posting content supplied by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: ProjectCategory,
    pub workflow: Workflow,
    pub tech_stack: Vec<String>,
    pub recruitment: Vec<RecruitmentPosition>,
    pub team_size: u16,
    pub duration: String,
    pub contact_url: Option<String>,
}

/// Partial update of a posting; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub workflow: Option<Workflow>,
    pub tech_stack: Option<Vec<String>>,
    pub recruitment: Option<Vec<RecruitmentPosition>>,
    pub team_size: Option<u16>,
    pub duration: Option<String>,
    pub contact_url: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Every stored field of a posting, used by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: ProjectCategory,
    pub workflow: Workflow,
    pub tech_stack: Vec<String>,
    pub recruitment: Vec<RecruitmentPosition>,
    pub team_size: u16,
    pub duration: String,
    pub contact_url: Option<String>,
    pub status: ProjectStatus,
    pub like_count: u32,
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated project posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    owner_id: UserId,
    title: ProjectTitle,
    summary: String,
    description: String,
    category: ProjectCategory,
    workflow: Workflow,
    tech_stack: TechStack,
    recruitment: RecruitmentPlan,
    team_size: u16,
    duration: String,
    contact_url: Option<WebUrl>,
    status: ProjectStatus,
    like_count: u32,
    view_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn bounded(
    text: &str,
    max: usize,
    too_long: ProjectValidationError,
) -> Result<String, ProjectValidationError> {
    let trimmed = text.trim();
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

fn summary(text: &str) -> Result<String, ProjectValidationError> {
    bounded(
        text,
        SUMMARY_MAX,
        ProjectValidationError::SummaryTooLong { max: SUMMARY_MAX },
    )
}

fn description(text: &str) -> Result<String, ProjectValidationError> {
    let value = bounded(
        text,
        DESCRIPTION_MAX,
        ProjectValidationError::DescriptionTooLong {
            max: DESCRIPTION_MAX,
        },
    )?;
    if value.is_empty() {
        return Err(ProjectValidationError::EmptyDescription);
    }
    Ok(value)
}

fn duration(text: &str) -> Result<String, ProjectValidationError> {
    bounded(
        text,
        DURATION_MAX,
        ProjectValidationError::DurationTooLong { max: DURATION_MAX },
    )
}

fn team_size(size: u16) -> Result<u16, ProjectValidationError> {
    if (1..=TEAM_SIZE_MAX).contains(&size) {
        Ok(size)
    } else {
        Err(ProjectValidationError::TeamSizeOutOfRange { max: TEAM_SIZE_MAX })
    }
}

fn contact_url(raw: Option<&str>) -> Result<Option<WebUrl>, ProjectValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(link) => Ok(Some(WebUrl::new(link)?)),
    }
}

impl Project {
    /// Validate a draft and create a recruiting posting owned by `owner_id`.
    pub fn create(
        id: ProjectId,
        owner_id: UserId,
        draft: ProjectDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        Self::from_record(ProjectRecord {
            id,
            owner_id,
            title: draft.title,
            summary: draft.summary,
            description: draft.description,
            category: draft.category,
            workflow: draft.workflow,
            tech_stack: draft.tech_stack,
            recruitment: draft.recruitment,
            team_size: draft.team_size,
            duration: draft.duration,
            contact_url: draft.contact_url,
            status: ProjectStatus::Recruiting,
            like_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a posting from stored fields, re-validating them.
    pub fn from_record(record: ProjectRecord) -> Result<Self, ProjectValidationError> {
        Ok(Self {
            id: record.id,
            owner_id: record.owner_id,
            title: ProjectTitle::new(&record.title)?,
            summary: summary(&record.summary)?,
            description: description(&record.description)?,
            category: record.category,
            workflow: record.workflow,
            tech_stack: TechStack::new(record.tech_stack)?,
            recruitment: RecruitmentPlan::new(record.recruitment)?,
            team_size: team_size(record.team_size)?,
            duration: duration(&record.duration)?,
            contact_url: contact_url(record.contact_url.as_deref())?,
            status: record.status,
            like_count: record.like_count,
            view_count: record.view_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Merge a patch into the posting.
    ///
    /// The patch is validated as a whole; on error the posting is unchanged.
    /// An empty contact URL clears the link.
    pub fn apply(
        &mut self,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectValidationError> {
        let mut next = self.clone();
        if let Some(value) = patch.title {
            next.title = ProjectTitle::new(value)?;
        }
        if let Some(value) = patch.summary {
            next.summary = summary(&value)?;
        }
        if let Some(value) = patch.description {
            next.description = description(&value)?;
        }
        if let Some(value) = patch.category {
            next.category = value;
        }
        if let Some(value) = patch.workflow {
            next.workflow = value;
        }
        if let Some(value) = patch.tech_stack {
            next.tech_stack = TechStack::new(value)?;
        }
        if let Some(value) = patch.recruitment {
            next.recruitment = RecruitmentPlan::new(value)?;
        }
        if let Some(value) = patch.team_size {
            next.team_size = team_size(value)?;
        }
        if let Some(value) = patch.duration {
            next.duration = duration(&value)?;
        }
        if let Some(value) = patch.contact_url {
            next.contact_url = contact_url(Some(&value))?;
        }
        if let Some(value) = patch.status {
            next.status = value;
        }
        next.updated_at = now;
        *self = next;
        Ok(())
    }

    /// Stop accepting applications.
    pub fn close(&mut self, now: DateTime<Utc>) {
        self.status = ProjectStatus::Closed;
        self.updated_at = now;
    }

    /// Whether `user` owns the posting.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Whether applications are accepted.
    #[must_use]
    pub fn is_recruiting(&self) -> bool {
        self.status == ProjectStatus::Recruiting
    }

    /// Count one more view.
    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
    }

    /// Adjust the like counter after a like (`true`) or unlike (`false`).
    pub fn record_like(&mut self, liked: bool) {
        self.like_count = if liked {
            self.like_count.saturating_add(1)
        } else {
            self.like_count.saturating_sub(1)
        };
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn title(&self) -> &ProjectTitle {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> ProjectCategory {
        self.category
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn tech_stack(&self) -> &TechStack {
        &self.tech_stack
    }

    pub fn recruitment(&self) -> &RecruitmentPlan {
        &self.recruitment
    }

    pub fn team_size(&self) -> u16 {
        self.team_size
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn contact_url(&self) -> Option<&WebUrl> {
        self.contact_url.as_ref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn like_count(&self) -> u32 {
        self.like_count
    }

    pub fn view_count(&self) -> u32 {
        self.view_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy every field into a record for persistence.
    #[must_use]
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title.as_ref().to_owned(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            category: self.category,
            workflow: self.workflow,
            tech_stack: self.tech_stack.tags().to_vec(),
            recruitment: self.recruitment.positions().to_vec(),
            team_size: self.team_size,
            duration: self.duration.clone(),
            contact_url: self.contact_url.as_ref().map(|url| url.as_ref().to_owned()),
            status: self.status,
            like_count: self.like_count,
            view_count: self.view_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
