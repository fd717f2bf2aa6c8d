//! Behaviour tests for toggling likes through the driving ports.

use std::cell::RefCell;
use std::sync::Arc;

use jam_backend::domain::ports::{
    CreateProjectRequest, FixtureEmailNotifier, FixtureIdentityVerifier, SliceRequest,
    ToggleLikeResponse,
};
use jam_backend::domain::{
    Error, ErrorCode, Position, ProjectCategory, ProjectDraft, ProjectId, RecruitmentPosition,
    UserId, Workflow,
};
use jam_backend::inbound::http::state::{DrivenAdapters, HttpStatePorts};
use jam_backend::outbound::memory::MemoryStore;
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct LikeWorld {
    runtime: Runtime,
    ports: HttpStatePorts,
    member: UserId,
    project: RefCell<Option<ProjectId>>,
    last: RefCell<Option<Result<ToggleLikeResponse, Error>>>,
}

impl LikeWorld {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let ports = HttpStatePorts::from_adapters(DrivenAdapters {
            projects: store.clone(),
            profiles: store.clone(),
            likes: store.clone(),
            applications: store,
            verifier: Arc::new(FixtureIdentityVerifier),
            notifier: Arc::new(FixtureEmailNotifier),
            clock: Arc::new(DefaultClock),
        });
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        Self {
            runtime,
            ports,
            member: UserId::random(),
            project: RefCell::new(None),
            last: RefCell::new(None),
        }
    }

    fn project_id(&self) -> ProjectId {
        self.project.borrow().expect("a posting id")
    }
}

fn draft() -> ProjectDraft {
    ProjectDraft {
        title: "Campus carpool board".to_owned(),
        summary: "Share rides to campus".to_owned(),
        description: "Students post and join daily rides.".to_owned(),
        category: ProjectCategory::SideProject,
        workflow: Workflow::Online,
        tech_stack: vec!["Rust".to_owned()],
        recruitment: vec![RecruitmentPosition {
            position: Position::Frontend,
            headcount: 2,
        }],
        team_size: 3,
        duration: "3 months".to_owned(),
        contact_url: None,
    }
}

#[fixture]
fn world() -> LikeWorld {
    LikeWorld::new()
}

#[given("a recruiting posting")]
fn a_recruiting_posting(world: &LikeWorld) {
    let project = world
        .runtime
        .block_on(world.ports.project_commands.create(CreateProjectRequest {
            owner_id: UserId::random(),
            draft: draft(),
        }))
        .expect("posting created");
    *world.project.borrow_mut() = Some(project.id());
}

#[given("no posting")]
fn no_posting(world: &LikeWorld) {
    *world.project.borrow_mut() = Some(ProjectId::random());
}

#[when("the member toggles their like")]
fn the_member_toggles_their_like(world: &LikeWorld) {
    let outcome = world.runtime.block_on(
        world
            .ports
            .like_commands
            .toggle_like(world.member, world.project_id()),
    );
    *world.last.borrow_mut() = Some(outcome);
}

#[then("the posting is liked")]
fn the_posting_is_liked(world: &LikeWorld) {
    let last = world.last.borrow();
    let response = last
        .as_ref()
        .expect("a toggle")
        .as_ref()
        .expect("toggle succeeded");
    assert!(response.success);
    assert!(response.liked);
    let liked = world
        .runtime
        .block_on(world.ports.likes.is_liked(world.member, world.project_id()))
        .expect("like lookup");
    assert!(liked);
}

#[then("the posting is not liked")]
fn the_posting_is_not_liked(world: &LikeWorld) {
    let last = world.last.borrow();
    let response = last
        .as_ref()
        .expect("a toggle")
        .as_ref()
        .expect("toggle succeeded");
    assert!(!response.liked);
    let liked = world
        .runtime
        .block_on(world.ports.likes.is_liked(world.member, world.project_id()))
        .expect("like lookup");
    assert!(!liked);
}

#[then("the like count is {count}")]
fn the_like_count_is(world: &LikeWorld, count: u32) {
    let project = world
        .runtime
        .block_on(world.ports.projects.get(world.project_id()))
        .expect("posting lookup");
    assert_eq!(project.like_count(), count);
}

#[then("the liked list total is {count}")]
fn the_liked_list_total_is(world: &LikeWorld, count: usize) {
    let slice = world
        .runtime
        .block_on(
            world
                .ports
                .likes
                .liked_projects(world.member, SliceRequest::default()),
        )
        .expect("liked list");
    assert_eq!(slice.total_items, count);
    assert_eq!(slice.items.len(), count);
}

#[then("the like fails because the posting was not found")]
fn the_like_fails_not_found(world: &LikeWorld) {
    let last = world.last.borrow();
    let error = last
        .as_ref()
        .expect("a toggle")
        .as_ref()
        .expect_err("toggle should fail");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[scenario(path = "tests/features/like_toggle.feature")]
fn like_toggle_scenarios(world: LikeWorld) {
    drop(world);
}
