//! Application settings loaded via OrthoConfig.
//!
//! Values come from `JAM_*` environment variables, matching CLI flags or an
//! optional configuration file. Session cookie settings are read separately
//! by [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOKEN_INFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Errors raised when settings values cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid {name} '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("{name} is required when {because}")]
    Missing {
        name: &'static str,
        because: &'static str,
    },
}

/// Identity provider the server verifies sign-in tokens against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySettings {
    /// Token-info endpoint check with the expected OAuth client id.
    TokenInfo { endpoint: Url, audience: String },
    /// Accept `fixture:<subject>:<email>` tokens; development only.
    Fixture,
}

/// Transactional email delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSettings {
    Http {
        endpoint: Url,
        sender: String,
        api_key: Option<String>,
    },
    /// Log messages instead of sending them.
    Logging,
}

/// Top-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JAM")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Token-info endpoint override.
    pub token_info_url: Option<String>,
    /// OAuth client id tokens must be issued for.
    pub client_id: Option<String>,
    /// Accept fixture sign-in tokens instead of calling the provider.
    #[ortho_config(default = false)]
    pub fixture_sign_in: bool,
    /// HTTP endpoint of the transactional email service.
    pub email_endpoint: Option<String>,
    /// Sender address for outgoing email.
    pub email_sender: Option<String>,
    /// Bearer token for the email service.
    pub email_api_key: Option<String>,
    /// Timeout, in seconds, for identity and email requests.
    pub outbound_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            Some(host) => host.parse::<IpAddr>().map_err(|err| SettingsError::Invalid {
                name: "host",
                value: host.to_owned(),
                reason: err.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    #[must_use]
    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(
            self.outbound_timeout_secs
                .unwrap_or(DEFAULT_OUTBOUND_TIMEOUT_SECS),
        )
    }

    /// How sign-in tokens are verified.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when fixture sign-in is off and no
    /// client id is configured, or [`SettingsError::Invalid`] for a bad URL.
    pub fn identity(&self) -> Result<IdentitySettings, SettingsError> {
        if self.fixture_sign_in {
            return Ok(IdentitySettings::Fixture);
        }
        let audience = self.client_id.clone().ok_or(SettingsError::Missing {
            name: "client_id",
            because: "fixture sign-in is disabled",
        })?;
        let endpoint = parse_url(
            "token_info_url",
            self.token_info_url.as_deref().unwrap_or(DEFAULT_TOKEN_INFO_URL),
        )?;
        Ok(IdentitySettings::TokenInfo { endpoint, audience })
    }

    /// How transactional email is delivered.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when an endpoint is set without a
    /// sender, or [`SettingsError::Invalid`] for a bad URL.
    pub fn email(&self) -> Result<EmailSettings, SettingsError> {
        let Some(raw) = self.email_endpoint.as_deref() else {
            return Ok(EmailSettings::Logging);
        };
        let endpoint = parse_url("email_endpoint", raw)?;
        let sender = self.email_sender.clone().ok_or(SettingsError::Missing {
            name: "email_sender",
            because: "email_endpoint is set",
        })?;
        Ok(EmailSettings::Http {
            endpoint,
            sender,
            api_key: self.email_api_key.clone(),
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::Invalid {
        name,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
