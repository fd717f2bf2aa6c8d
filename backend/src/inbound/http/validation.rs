//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending JSON or query field, so clients can highlight it.

use std::fmt::Display;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::domain::{Error, ProjectId, UserId, UserValidationError, WebUrlError};

/// Validation error codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    UnknownKeyword,
    InvalidValue,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::UnknownKeyword => "unknown_keyword",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
    extra: Vec<(&'static str, Value)>,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
            extra: Vec::new(),
        }
    }

    fn with_detail(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.extra.push((key, value.into()));
        self
    }

    fn into_error(self, code: ErrorCode) -> Error {
        let mut details = json!({ "field": self.field, "code": code.as_str() });
        if let Some(map) = details.as_object_mut() {
            for (key, value) in self.extra {
                map.insert(key.to_owned(), value);
            }
        }
        Error::invalid_request(self.message).with_details(details)
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .into_error(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    ValidationError::new(field, format!("{} must be a valid UUID", field.as_str()))
        .with_detail("value", value)
        .into_error(ErrorCode::InvalidUuid)
}

pub(crate) fn invalid_value_error(field: FieldName, message: impl Display) -> Error {
    ValidationError::new(field, message.to_string()).into_error(ErrorCode::InvalidValue)
}

pub(crate) fn parse_project_id(value: &str) -> Result<ProjectId, Error> {
    ProjectId::new(value).map_err(|_| invalid_uuid_error(FieldName::new("projectId"), value))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(FieldName::new("userId"), value))
}

/// Parse a keyword such as a category or position.
///
/// The keyword error's display text lists the accepted values.
pub(crate) fn parse_keyword<T>(field: FieldName, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse::<T>().map_err(|error| {
        ValidationError::new(field, error.to_string())
            .with_detail("value", value)
            .into_error(ErrorCode::UnknownKeyword)
    })
}

pub(crate) fn parse_optional_keyword<T>(
    field: FieldName,
    value: Option<&str>,
) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_keyword(field, raw))
        .transpose()
}

fn user_field(error: &UserValidationError) -> &'static str {
    match error {
        UserValidationError::EmptyId | UserValidationError::InvalidId => "userId",
        UserValidationError::EmptyDisplayName | UserValidationError::DisplayNameTooLong { .. } => {
            "displayName"
        }
        UserValidationError::InvalidEmail => "email",
        UserValidationError::IntroductionTooLong { .. } => "introduction",
    }
}

pub(crate) fn user_validation_error(error: &UserValidationError) -> Error {
    invalid_value_error(FieldName::new(user_field(error)), error)
}

pub(crate) fn web_url_error(field: FieldName, error: &WebUrlError) -> Error {
    invalid_value_error(field, format_args!("{} is invalid: {error}", field.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as ApiErrorCode, ProjectCategory};
    use rstest::rstest;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a Value> {
        error.details().and_then(|details| details.get(key))
    }

    #[rstest]
    fn unknown_keyword_lists_accepted_values() {
        let error = parse_keyword::<ProjectCategory>(FieldName::new("category"), "hackathon")
            .expect_err("unknown category");
        assert_eq!(error.code(), ApiErrorCode::InvalidRequest);
        assert!(error.message().contains("side_project"), "{}", error.message());
        assert_eq!(detail(&error, "field"), Some(&json!("category")));
        assert_eq!(detail(&error, "code"), Some(&json!("unknown_keyword")));
        assert_eq!(detail(&error, "value"), Some(&json!("hackathon")));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn blank_optional_keyword_is_absent(#[case] raw: Option<&str>) {
        let parsed = parse_optional_keyword::<ProjectCategory>(FieldName::new("category"), raw)
            .expect("blank accepted");
        assert_eq!(parsed, None);
    }

    #[rstest]
    #[case(UserValidationError::EmptyDisplayName, "displayName")]
    #[case(UserValidationError::IntroductionTooLong { max: 500 }, "introduction")]
    #[case(UserValidationError::InvalidEmail, "email")]
    fn user_errors_name_their_field(#[case] error: UserValidationError, #[case] field: &str) {
        let mapped = user_validation_error(&error);
        assert_eq!(detail(&mapped, "field"), Some(&json!(field)));
        assert_eq!(mapped.message(), error.to_string());
    }

    #[rstest]
    fn bad_project_id_reports_value() {
        let error = parse_project_id("not-a-uuid").expect_err("invalid id");
        assert_eq!(detail(&error, "code"), Some(&json!("invalid_uuid")));
        assert_eq!(detail(&error, "value"), Some(&json!("not-a-uuid")));
    }
}
