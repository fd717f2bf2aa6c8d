//! Test utilities for the backend crate.
//!
//! Shared builders for unit tests in `src/`. Only compiled for tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};

use crate::domain::{
    DisplayName, Email, ExperienceTier, Introduction, Position, Project, ProjectCategory,
    ProjectDraft, ProjectId, RecruitmentPosition, SignUpDetails, UserId, UserProfile, Workflow,
};

/// Fixed instant used across service tests.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 20, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at `now`.
pub fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

/// Valid draft recruiting one backend and one designer.
pub fn sample_draft() -> ProjectDraft {
    ProjectDraft {
        title: "Study buddy matcher".to_owned(),
        summary: "Pair people preparing for the same exam".to_owned(),
        description: "A small web app that matches study partners.".to_owned(),
        category: ProjectCategory::SideProject,
        workflow: Workflow::Online,
        tech_stack: vec!["Rust".to_owned(), "Svelte".to_owned()],
        recruitment: vec![
            RecruitmentPosition {
                position: Position::Backend,
                headcount: 1,
            },
            RecruitmentPosition {
                position: Position::Designer,
                headcount: 1,
            },
        ],
        team_size: 3,
        duration: "2 months".to_owned(),
        contact_url: None,
    }
}

/// Recruiting posting owned by `owner`.
pub fn sample_project(owner: UserId) -> Project {
    Project::create(ProjectId::random(), owner, sample_draft(), fixture_now())
        .expect("valid sample draft")
}

/// Onboarded profile for `id`.
pub fn sample_profile(id: UserId) -> UserProfile {
    let mut profile = UserProfile::skeleton(
        id,
        DisplayName::new("Sample Owner").expect("valid name"),
        Email::new("owner@example.com").expect("valid email"),
        None,
        fixture_now(),
    );
    profile.complete_sign_up(
        SignUpDetails {
            display_name: DisplayName::new("Sample Owner").expect("valid name"),
            position: Position::Planner,
            experience: ExperienceTier::Mid,
            introduction: Introduction::default(),
        },
        fixture_now(),
    );
    profile
}
