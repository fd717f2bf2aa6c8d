//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use jam_backend::inbound::http::session_config::SessionSettings;
use jam_backend::outbound::persistence::DbPool;
use jam_backend::settings::{EmailSettings, IdentitySettings};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: IdentitySettings,
    pub(crate) email: EmailSettings,
    pub(crate) outbound_timeout: Duration,
}

impl ServerConfig {
    /// Construct a configuration from validated session settings.
    ///
    /// Sign-in defaults to fixture tokens and email to logging until
    /// [`Self::with_identity`] and [`Self::with_email`] say otherwise.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            db_pool: None,
            identity: IdentitySettings::Fixture,
            email: EmailSettings::Logging,
            outbound_timeout: Duration::from_secs(10),
        }
    }

    /// Attach a database connection pool; without one the in-memory store
    /// backs every repository port.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_identity(mut self, identity: IdentitySettings) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: EmailSettings) -> Self {
        self.email = email;
        self
    }

    /// Timeout applied to identity-provider and email requests.
    #[must_use]
    pub fn with_outbound_timeout(mut self, timeout: Duration) -> Self {
        self.outbound_timeout = timeout;
        self
    }
}
