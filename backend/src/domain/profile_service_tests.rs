//! Tests for sign-in and profile services.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockApplicationRepository, MockIdentityVerifier, MockLikeRepository,
    MockUserProfileRepository,
};
use crate::domain::{
    DisplayName, Email, ErrorCode, ExperienceTier, Introduction, Position, ProjectId,
    VerifiedIdentity,
};
use crate::test_support::{fixed_clock, fixture_now, sample_profile};
use rstest::rstest;

type Service = ProfileService<
    MockUserProfileRepository,
    MockLikeRepository,
    MockApplicationRepository,
    MockIdentityVerifier,
>;

fn make_service(
    profiles: MockUserProfileRepository,
    likes: MockLikeRepository,
    applications: MockApplicationRepository,
    verifier: MockIdentityVerifier,
) -> Service {
    ProfileService::new(
        Arc::new(profiles),
        Arc::new(likes),
        Arc::new(applications),
        Arc::new(verifier),
        fixed_clock(fixture_now()),
    )
}

fn profiles_only(profiles: MockUserProfileRepository) -> Service {
    make_service(
        profiles,
        MockLikeRepository::new(),
        MockApplicationRepository::new(),
        MockIdentityVerifier::new(),
    )
}

fn identity() -> VerifiedIdentity {
    VerifiedIdentity {
        provider: "google".to_owned(),
        subject: "10769150350006150715113082367".to_owned(),
        email: Email::new("newcomer@example.com").expect("valid email"),
        display_name: DisplayName::new("Newcomer").expect("valid name"),
        photo_url: None,
    }
}

fn verifier_returning(
    result: Result<VerifiedIdentity, IdentityVerifierError>,
) -> MockIdentityVerifier {
    let mut verifier = MockIdentityVerifier::new();
    verifier
        .expect_verify()
        .times(1)
        .return_once(move |_| result);
    verifier
}

fn token() -> IdentityToken {
    IdentityToken::new("opaque-token").expect("token")
}

#[tokio::test]
async fn first_sign_in_creates_skeleton_profile() {
    let expected_id = identity().user_id();
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().times(1).return_once(|_| Ok(None));
    profiles
        .expect_insert_if_absent()
        .withf(move |profile| {
            profile.id() == expected_id
                && !profile.onboarded()
                && profile.email().as_ref() == "newcomer@example.com"
        })
        .times(1)
        .return_once(|profile| Ok(profile.clone()));
    profiles.expect_save().never();

    let service = make_service(
        profiles,
        MockLikeRepository::new(),
        MockApplicationRepository::new(),
        verifier_returning(Ok(identity())),
    );
    let outcome = service.sign_in(&token()).await.expect("sign-in succeeds");
    assert_eq!(outcome.user_id, expected_id);
    assert!(outcome.onboarding_required);
}

#[tokio::test]
async fn returning_user_keeps_existing_profile() {
    let user_id = identity().user_id();
    let mut profiles = MockUserProfileRepository::new();
    profiles
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(sample_profile(user_id))));
    profiles.expect_save().never();

    let service = make_service(
        profiles,
        MockLikeRepository::new(),
        MockApplicationRepository::new(),
        verifier_returning(Ok(identity())),
    );
    let outcome = service.sign_in(&token()).await.expect("sign-in succeeds");
    assert!(!outcome.onboarding_required);
}

#[tokio::test]
async fn racing_first_sign_in_adopts_the_stored_profile() {
    let user_id = identity().user_id();
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().times(1).return_once(|_| Ok(None));
    profiles
        .expect_insert_if_absent()
        .times(1)
        .return_once(move |_| Ok(sample_profile(user_id)));
    profiles.expect_save().never();

    let service = make_service(
        profiles,
        MockLikeRepository::new(),
        MockApplicationRepository::new(),
        verifier_returning(Ok(identity())),
    );
    let outcome = service.sign_in(&token()).await.expect("sign-in succeeds");
    assert!(!outcome.onboarding_required);
}

#[rstest]
#[case(IdentityVerifierError::rejected("expired"), ErrorCode::Unauthorized)]
#[case(IdentityVerifierError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
#[case(IdentityVerifierError::malformed("missing sub"), ErrorCode::InternalError)]
#[tokio::test]
async fn verifier_failures_map_to_api_codes(
    #[case] failure: IdentityVerifierError,
    #[case] expected: ErrorCode,
) {
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().never();

    let service = make_service(
        profiles,
        MockLikeRepository::new(),
        MockApplicationRepository::new(),
        verifier_returning(Err(failure)),
    );
    let error = service.sign_in(&token()).await.expect_err("rejected");
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn complete_sign_up_onboards_profile() {
    let user_id = UserId::random();
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().times(1).return_once(move |_| {
        Ok(Some(UserProfile::skeleton(
            user_id,
            DisplayName::new("Skeleton").expect("valid name"),
            Email::new("s@example.com").expect("valid email"),
            None,
            fixture_now(),
        )))
    });
    profiles
        .expect_save()
        .withf(|profile| profile.onboarded())
        .times(1)
        .return_once(|_| Ok(()));

    let profile = profiles_only(profiles)
        .complete_sign_up(
            user_id,
            SignUpDetails {
                display_name: DisplayName::new("Ada").expect("valid name"),
                position: Position::Backend,
                experience: ExperienceTier::Senior,
                introduction: Introduction::new("Databases and Rust").expect("valid intro"),
            },
        )
        .await
        .expect("sign-up succeeds");
    assert_eq!(profile.display_name().as_ref(), "Ada");
}

#[tokio::test]
async fn empty_update_is_rejected_without_lookup() {
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().never();

    let error = profiles_only(profiles)
        .update_profile(UserId::random(), ProfileChanges::default())
        .await
        .expect_err("empty update");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_of_unknown_profile_is_not_found() {
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = profiles_only(profiles)
        .update_profile(
            UserId::random(),
            ProfileChanges {
                position: Some(Position::Ai),
                ..ProfileChanges::default()
            },
        )
        .await
        .expect_err("missing profile");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn own_profile_lists_liked_and_applied_projects() {
    let user_id = UserId::random();
    let liked = vec![ProjectId::random(), ProjectId::random()];
    let applied = vec![ProjectId::random()];
    let (liked_clone, applied_clone) = (liked.clone(), applied.clone());

    let mut profiles = MockUserProfileRepository::new();
    profiles
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(sample_profile(user_id))));
    let mut likes = MockLikeRepository::new();
    likes
        .expect_liked_project_ids()
        .times(1)
        .return_once(move |_| Ok(liked_clone));
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_applied_project_ids()
        .times(1)
        .return_once(move |_| Ok(applied_clone));

    let overview = make_service(profiles, likes, applications, MockIdentityVerifier::new())
        .own_profile(user_id)
        .await
        .expect("overview");
    assert_eq!(overview.liked_project_ids, liked);
    assert_eq!(overview.applied_project_ids, applied);
}

#[tokio::test]
async fn profile_store_outage_is_service_unavailable() {
    let mut profiles = MockUserProfileRepository::new();
    profiles
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(UserProfileRepositoryError::connection("refused")));

    let error = profiles_only(profiles)
        .public_profile(UserId::random())
        .await
        .expect_err("outage");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
