//! Reqwest-backed identity verifier.
//!
//! The adapter hands the client's ID token to the provider's token-info
//! endpoint and trusts the provider's answer. It owns transport details
//! only: timeouts, HTTP status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{TokenInfoDto, TokenInfoProblem};
use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{IdentityToken, VerifiedIdentity};

/// Provider name recorded for identities verified through token-info.
pub const DEFAULT_PROVIDER: &str = "google";

/// Identity verifier backed by an OAuth token-info endpoint.
pub struct TokenInfoVerifier {
    client: Client,
    endpoint: Url,
    audience: String,
    provider: String,
}

impl TokenInfoVerifier {
    /// Build a verifier that accepts tokens issued for `audience`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        audience: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            audience: audience.into(),
            provider: DEFAULT_PROVIDER.to_owned(),
        })
    }

    /// Record verified identities under a different provider name.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }
}

#[async_trait]
impl IdentityVerifier for TokenInfoVerifier {
    async fn verify(
        &self,
        token: &IdentityToken,
    ) -> Result<VerifiedIdentity, IdentityVerifierError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("id_token", token.expose())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            debug!(status = status.as_u16(), %error, "token-info request failed");
            return Err(error);
        }
        parse_identity(body.as_ref(), &self.provider, &self.audience)
    }
}

fn parse_identity(
    body: &[u8],
    provider: &str,
    audience: &str,
) -> Result<VerifiedIdentity, IdentityVerifierError> {
    let decoded: TokenInfoDto = serde_json::from_slice(body).map_err(|error| {
        IdentityVerifierError::malformed(format!("invalid token-info JSON payload: {error}"))
    })?;
    decoded
        .into_identity(provider, audience)
        .map_err(|problem| match problem {
            TokenInfoProblem::Rejected(message) => IdentityVerifierError::rejected(message),
            TokenInfoProblem::Malformed(message) => IdentityVerifierError::malformed(message),
        })
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerifierError {
    IdentityVerifierError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityVerifierError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
            IdentityVerifierError::unavailable(message)
        }
        _ if status.is_client_error() => IdentityVerifierError::rejected(message),
        _ => IdentityVerifierError::unavailable(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
