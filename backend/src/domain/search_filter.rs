//! Browse filters and listing order for project postings.
//!
//! A [`SearchFilter`] is an ephemeral value built from query parameters; it
//! is never stored. Listings are ordered by the filter's sort key, then by
//! newest first with the id as the final tie-breaker, so a
//! [`ProjectCursorKey`] identifies a unique position in any listing.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::keyword::keyword_enum;
use super::{Position, Project, ProjectCategory, ProjectStatus, Workflow};

keyword_enum! {
    /// Listing order for project postings.
    #[derive(Default)]
    pub enum SortOrder {
        error = ParseSortOrderError,
        label = "sort order",
        /// Newest first.
        #[default]
        Latest => "latest",
        /// Most liked first.
        Popular => "popular",
        /// Most viewed first.
        Views => "views",
    }
}

/// Criteria for browsing project postings.
///
/// Every criterion is optional; an empty filter lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub category: Option<ProjectCategory>,
    pub position: Option<Position>,
    pub status: Option<ProjectStatus>,
    pub workflow: Option<Workflow>,
    pub sort: SortOrder,
}

impl SearchFilter {
    /// Whether `project` satisfies every criterion.
    ///
    /// The position criterion matches postings that recruit that position.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.category.is_none_or(|c| project.category() == c)
            && self.status.is_none_or(|s| project.status() == s)
            && self.workflow.is_none_or(|w| project.workflow() == w)
            && self
                .position
                .is_none_or(|p| project.recruitment().recruits(p))
    }
}

/// Position of a posting within a sorted listing.
///
/// `rank` is the sort key value: the like count for [`SortOrder::Popular`],
/// the view count for [`SortOrder::Views`] and zero for
/// [`SortOrder::Latest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCursorKey {
    pub sort: SortOrder,
    pub rank: i64,
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl ProjectCursorKey {
    /// Key of `project` in a listing sorted by `sort`.
    #[must_use]
    pub fn for_project(sort: SortOrder, project: &Project) -> Self {
        let rank = match sort {
            SortOrder::Latest => 0,
            SortOrder::Popular => i64::from(project.like_count()),
            SortOrder::Views => i64::from(project.view_count()),
        };
        Self {
            sort,
            rank,
            created_at: project.created_at(),
            id: *project.id().as_uuid(),
        }
    }

    /// Listing order: larger rank, then newer, then larger id first.
    #[must_use]
    pub fn listing_cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }

    /// Whether `other` comes strictly after `self` in the listing.
    #[must_use]
    pub fn precedes(&self, other: &Self) -> bool {
        self.listing_cmp(other) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectDraft, ProjectId, RecruitmentPosition, UserId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn key(rank: i64, minute: u32, id: u128) -> ProjectCursorKey {
        ProjectCursorKey {
            sort: SortOrder::Popular,
            rank,
            created_at: Utc
                .with_ymd_and_hms(2026, 5, 1, 10, minute, 0)
                .single()
                .expect("valid timestamp"),
            id: Uuid::from_u128(id),
        }
    }

    fn project(category: ProjectCategory, position: Position) -> Project {
        Project::create(
            ProjectId::random(),
            UserId::random(),
            ProjectDraft {
                title: "Filter me".into(),
                summary: String::new(),
                description: "Body".into(),
                category,
                workflow: Workflow::Offline,
                tech_stack: Vec::new(),
                recruitment: vec![RecruitmentPosition {
                    position,
                    headcount: 1,
                }],
                team_size: 3,
                duration: String::new(),
                contact_url: None,
            },
            Utc::now(),
        )
        .expect("valid draft")
    }

    #[rstest]
    fn higher_rank_comes_first() {
        assert!(key(5, 0, 1).precedes(&key(4, 30, 9)));
    }

    #[rstest]
    fn ties_break_by_recency_then_id() {
        assert!(key(1, 30, 1).precedes(&key(1, 10, 9)));
        assert!(key(1, 10, 9).precedes(&key(1, 10, 1)));
        assert!(!key(1, 10, 1).precedes(&key(1, 10, 1)));
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        let filter = SearchFilter::default();
        assert!(filter.matches(&project(ProjectCategory::Study, Position::Planner)));
        assert_eq!(filter.sort, SortOrder::Latest);
    }

    #[rstest]
    #[case(Some(ProjectCategory::Study), None, true)]
    #[case(Some(ProjectCategory::Contest), None, false)]
    #[case(None, Some(Position::Planner), true)]
    #[case(None, Some(Position::Mobile), false)]
    fn criteria_are_conjunctive(
        #[case] category: Option<ProjectCategory>,
        #[case] position: Option<Position>,
        #[case] expected: bool,
    ) {
        let filter = SearchFilter {
            category,
            position,
            status: Some(ProjectStatus::Recruiting),
            ..SearchFilter::default()
        };
        let posting = project(ProjectCategory::Study, Position::Planner);
        assert_eq!(filter.matches(&posting), expected);
    }

    #[rstest]
    fn sort_keywords_parse() {
        assert_eq!("views".parse::<SortOrder>(), Ok(SortOrder::Views));
        assert!("oldest".parse::<SortOrder>().is_err());
    }
}
