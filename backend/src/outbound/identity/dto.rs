//! DTOs for decoding token-info responses.
//!
//! Providers encode booleans inconsistently (`"true"` or `true`), so the
//! DTO accepts both before mapping into a [`VerifiedIdentity`].

use serde::Deserialize;

use crate::domain::{DisplayName, Email, VerifiedIdentity, WebUrl};

#[derive(Debug, Deserialize)]
pub(super) struct TokenInfoDto {
    pub(super) sub: String,
    pub(super) aud: String,
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) email_verified: Option<FlagDto>,
    pub(super) name: Option<String>,
    pub(super) picture: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum FlagDto {
    Bool(bool),
    Text(String),
}

impl FlagDto {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

/// Why a decoded payload cannot be accepted.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum TokenInfoProblem {
    /// The token is genuine but unusable for sign-in.
    Rejected(String),
    /// The payload does not have the expected shape.
    Malformed(String),
}

impl TokenInfoDto {
    pub(super) fn into_identity(
        self,
        provider: &str,
        audience: &str,
    ) -> Result<VerifiedIdentity, TokenInfoProblem> {
        if self.aud != audience {
            return Err(TokenInfoProblem::Rejected(format!(
                "token issued for audience {}",
                self.aud
            )));
        }
        if self.sub.trim().is_empty() {
            return Err(TokenInfoProblem::Malformed("token subject is empty".to_owned()));
        }
        if !self.email_verified.as_ref().is_some_and(FlagDto::is_set) {
            return Err(TokenInfoProblem::Rejected(
                "email address is not verified".to_owned(),
            ));
        }
        let raw_email = self
            .email
            .ok_or_else(|| TokenInfoProblem::Malformed("token carries no email".to_owned()))?;
        let email =
            Email::new(raw_email).map_err(|err| TokenInfoProblem::Malformed(err.to_string()))?;

        let display_name = self
            .name
            .as_deref()
            .and_then(|name| DisplayName::truncated(name).ok())
            .unwrap_or_else(|| DisplayName::from_email(&email));
        // A broken avatar link should not block sign-in.
        let photo_url = self.picture.and_then(|url| WebUrl::new(url).ok());

        Ok(VerifiedIdentity {
            provider: provider.to_owned(),
            subject: self.sub,
            email,
            display_name,
            photo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const AUDIENCE: &str = "jam-web.apps.example.com";

    fn decode(json: &str) -> TokenInfoDto {
        serde_json::from_str(json).expect("valid token info")
    }

    #[rstest]
    #[case::string_flag(r#""true""#)]
    #[case::bool_flag("true")]
    fn verified_tokens_map_to_identities(#[case] flag: &str) {
        let dto = decode(&format!(
            r#"{{"sub":"1087","aud":"{AUDIENCE}","email":"mina@example.com",
                "email_verified":{flag},"name":"Mina Park",
                "picture":"https://lh3.example.com/a.png"}}"#
        ));
        let identity = dto.into_identity("google", AUDIENCE).expect("accepted");
        assert_eq!(identity.subject, "1087");
        assert_eq!(identity.display_name.as_ref(), "Mina Park");
        assert_eq!(identity.email.as_ref(), "mina@example.com");
        assert!(identity.photo_url.is_some());
    }

    #[rstest]
    fn foreign_audience_is_rejected() {
        let dto = decode(
            r#"{"sub":"1","aud":"someone-else","email":"a@b.c","email_verified":"true"}"#,
        );
        assert!(matches!(
            dto.into_identity("google", AUDIENCE),
            Err(TokenInfoProblem::Rejected(_))
        ));
    }

    #[rstest]
    #[case::unverified(r#""false""#)]
    #[case::missing("null")]
    fn unverified_email_is_rejected(#[case] flag: &str) {
        let dto = decode(&format!(
            r#"{{"sub":"1","aud":"{AUDIENCE}","email":"a@b.c","email_verified":{flag}}}"#
        ));
        assert!(matches!(
            dto.into_identity("google", AUDIENCE),
            Err(TokenInfoProblem::Rejected(_))
        ));
    }

    #[rstest]
    fn missing_name_falls_back_to_email_local_part() {
        let dto = decode(&format!(
            r#"{{"sub":"9","aud":"{AUDIENCE}","email":"joon@example.com",
                "email_verified":true,"name":"   ","picture":"not a url"}}"#
        ));
        let identity = dto.into_identity("google", AUDIENCE).expect("accepted");
        assert_eq!(identity.display_name.as_ref(), "joon");
        assert!(identity.photo_url.is_none());
    }

    #[rstest]
    fn missing_email_is_malformed() {
        let dto = decode(&format!(
            r#"{{"sub":"9","aud":"{AUDIENCE}","email_verified":true}}"#
        ));
        assert!(matches!(
            dto.into_identity("google", AUDIENCE),
            Err(TokenInfoProblem::Malformed(_))
        ));
    }
}
