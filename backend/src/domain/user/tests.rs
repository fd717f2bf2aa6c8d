//! Tests for user value types and profile merging.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn skeleton() -> UserProfile {
    UserProfile::skeleton(
        UserId::random(),
        DisplayName::new("Jam Tester").expect("valid name"),
        Email::new("tester@example.com").expect("valid email"),
        None,
        at(9),
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn provider_subjects_map_to_distinct_ids() {
    let a = UserId::from_provider_subject("google", "1");
    let b = UserId::from_provider_subject("google", "2");
    let c = UserId::from_provider_subject("fixture", "1");
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.as_uuid().get_version_num(), 5);
}

#[rstest]
fn display_name_is_trimmed_and_bounded() {
    assert_eq!(
        DisplayName::new("   "),
        Err(UserValidationError::EmptyDisplayName)
    );
    let trimmed = DisplayName::new("  Ada  ").expect("valid name");
    assert_eq!(trimmed.as_ref(), "Ada");
    assert!(DisplayName::new("가".repeat(32)).is_ok());
    assert_eq!(
        DisplayName::new("a".repeat(33)),
        Err(UserValidationError::DisplayNameTooLong { max: 32 })
    );
}

#[rstest]
fn derived_display_names_fit_the_limit() {
    let long = DisplayName::truncated(&"b".repeat(40)).expect("truncated name");
    assert_eq!(long.as_ref().chars().count(), DISPLAY_NAME_MAX);

    let email = Email::new(format!("{}@example.com", "c".repeat(40))).expect("valid email");
    assert_eq!(
        DisplayName::from_email(&email).as_ref().chars().count(),
        DISPLAY_NAME_MAX
    );
    let short = Email::new("grace@example.com").expect("valid email");
    assert_eq!(DisplayName::from_email(&short).as_ref(), "grace");
}

#[rstest]
#[case("a@b.c", true)]
#[case(" a@b.c ", true)]
#[case("a@@b.c", false)]
#[case("@b.c", false)]
#[case("a@", false)]
#[case("a b@c.d", false)]
#[case("plain", false)]
fn email_shape(#[case] raw: &str, #[case] ok: bool) {
    assert_eq!(Email::new(raw).is_ok(), ok);
}

#[rstest]
fn introduction_is_bounded() {
    assert!(Introduction::new("x".repeat(500)).is_ok());
    assert_eq!(
        Introduction::new("x".repeat(501)),
        Err(UserValidationError::IntroductionTooLong { max: 500 })
    );
}

#[rstest]
fn positions_parse_from_keywords() {
    assert_eq!("fullstack".parse::<Position>(), Ok(Position::Fullstack));
    assert!("manager".parse::<Position>().is_err());
    assert_eq!(ExperienceTier::Mid.to_string(), "mid");
}

#[rstest]
fn skeleton_requires_onboarding(skeleton: UserProfile) {
    assert!(!skeleton.onboarded());
    assert!(skeleton.position().is_none());
    assert_eq!(skeleton.created_at(), skeleton.updated_at());
}

#[rstest]
fn sign_up_completes_onboarding(mut skeleton: UserProfile) {
    skeleton.complete_sign_up(
        SignUpDetails {
            display_name: DisplayName::new("Ada").expect("valid name"),
            position: Position::Backend,
            experience: ExperienceTier::Senior,
            introduction: Introduction::new("Rust and Postgres").expect("valid intro"),
        },
        at(10),
    );
    assert!(skeleton.onboarded());
    assert_eq!(skeleton.position(), Some(Position::Backend));
    assert_eq!(skeleton.updated_at(), at(10));
}

#[rstest]
fn apply_only_touches_supplied_fields(mut skeleton: UserProfile) {
    let before = skeleton.clone();
    skeleton.apply(
        ProfileChanges {
            introduction: Some(Introduction::new("hello").expect("valid intro")),
            ..ProfileChanges::default()
        },
        at(11),
    );
    assert_eq!(skeleton.introduction().as_ref(), "hello");
    assert_eq!(skeleton.display_name(), before.display_name());
    assert_eq!(skeleton.email(), before.email());
    assert_eq!(skeleton.position(), before.position());
    assert_eq!(skeleton.updated_at(), at(11));
}

#[rstest]
fn record_round_trip_downgrades_inconsistent_onboarding(skeleton: UserProfile) {
    let mut record = skeleton.to_record();
    record.onboarded = true;
    let restored = UserProfile::from_record(record);
    assert!(!restored.onboarded());
}

#[rstest]
fn empty_changes_are_detected() {
    assert!(ProfileChanges::default().is_empty());
    let changes = ProfileChanges {
        position: Some(Position::Ai),
        ..ProfileChanges::default()
    };
    assert!(!changes.is_empty());
}
