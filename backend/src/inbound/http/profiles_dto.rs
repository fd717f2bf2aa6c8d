//! Request and response bodies for sign-in and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{
    FieldName, missing_field_error, parse_keyword, parse_optional_keyword, user_validation_error,
    web_url_error,
};
use crate::domain::dates::format_date;
use crate::domain::ports::ProfileOverview;
use crate::domain::{
    DisplayName, Error, ExperienceTier, Introduction, Position, ProfileChanges, SignUpDetails,
    UserProfile, WebUrl,
};

const DISPLAY_NAME: FieldName = FieldName::new("displayName");
const POSITION: FieldName = FieldName::new("position");
const EXPERIENCE: FieldName = FieldName::new("experience");
const PHOTO_URL: FieldName = FieldName::new("photoUrl");

/// Body of `POST /api/v1/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// ID token issued by the identity provider's sign-in popup.
    pub id_token: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(format = Uuid)]
    pub user_id: String,
    /// True until the sign-up form has been submitted.
    pub onboarding_required: bool,
}

/// Body of `PUT /api/v1/users/me`, the sign-up form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignUpBody {
    #[schema(example = "Ada")]
    pub display_name: Option<String>,
    #[schema(example = "backend")]
    pub position: Option<String>,
    #[schema(example = "junior")]
    pub experience: Option<String>,
    #[serde(default)]
    pub introduction: String,
}

fn display_name(raw: &str) -> Result<DisplayName, Error> {
    DisplayName::new(raw).map_err(|err| user_validation_error(&err))
}

fn introduction(raw: String) -> Result<Introduction, Error> {
    Introduction::new(raw).map_err(|err| user_validation_error(&err))
}

fn required<'a>(field: FieldName, value: Option<&'a str>) -> Result<&'a str, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

impl TryFrom<SignUpBody> for SignUpDetails {
    type Error = Error;

    fn try_from(body: SignUpBody) -> Result<Self, Self::Error> {
        Ok(Self {
            display_name: display_name(required(DISPLAY_NAME, body.display_name.as_deref())?)?,
            position: parse_keyword::<Position>(
                POSITION,
                required(POSITION, body.position.as_deref())?,
            )?,
            experience: parse_keyword::<ExperienceTier>(
                EXPERIENCE,
                required(EXPERIENCE, body.experience.as_deref())?,
            )?,
            introduction: introduction(body.introduction)?,
        })
    }
}

/// Body of `PATCH /api/v1/users/me`; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileChangesBody {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub introduction: Option<String>,
}

impl TryFrom<ProfileChangesBody> for ProfileChanges {
    type Error = Error;

    fn try_from(body: ProfileChangesBody) -> Result<Self, Self::Error> {
        Ok(Self {
            display_name: body.display_name.as_deref().map(display_name).transpose()?,
            photo_url: body
                .photo_url
                .map(|raw| WebUrl::new(raw).map_err(|err| web_url_error(PHOTO_URL, &err)))
                .transpose()?,
            position: parse_optional_keyword(POSITION, body.position.as_deref())?,
            experience: parse_optional_keyword(EXPERIENCE, body.experience.as_deref())?,
            introduction: body.introduction.map(introduction).transpose()?,
        })
    }
}

/// Profile fields anyone may see.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileResponse {
    #[schema(format = Uuid)]
    pub id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub introduction: String,
    /// Sign-up date as `YYYY.MM.DD`.
    #[schema(example = "2026.05.20")]
    pub joined_on: String,
}

impl From<&UserProfile> for PublicProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id().to_string(),
            display_name: profile.display_name().to_string(),
            photo_url: profile.photo_url().map(ToString::to_string),
            position: profile.position().map(|p| p.as_str().to_owned()),
            experience: profile.experience().map(|e| e.as_str().to_owned()),
            introduction: profile.introduction().as_ref().to_owned(),
            joined_on: format_date(profile.created_at()),
        }
    }
}

/// The caller's own profile, including private fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub public: PublicProfileResponse,
    pub email: String,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            public: PublicProfileResponse::from(profile),
            email: profile.email().to_string(),
            onboarded: profile.onboarded(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}

/// `GET /api/v1/users/me`: the profile plus liked and applied posting ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub liked_project_ids: Vec<String>,
    pub applied_project_ids: Vec<String>,
}

impl From<&ProfileOverview> for OwnProfileResponse {
    fn from(overview: &ProfileOverview) -> Self {
        Self {
            profile: ProfileResponse::from(&overview.profile),
            liked_project_ids: overview
                .liked_project_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            applied_project_ids: overview
                .applied_project_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
