//! Builders for the HTTP state and the driven adapters behind it.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use jam_backend::domain::Email;
use jam_backend::domain::ports::{EmailNotifier, FixtureIdentityVerifier, IdentityVerifier};
use jam_backend::inbound::http::state::{DrivenAdapters, HttpState, HttpStatePorts};
use jam_backend::outbound::email::{HttpEmailNotifier, LoggingEmailNotifier};
use jam_backend::outbound::identity::TokenInfoVerifier;
use jam_backend::outbound::memory::MemoryStore;
use jam_backend::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselLikeRepository, DieselProjectRepository,
    DieselUserProfileRepository,
};
use jam_backend::settings::{EmailSettings, IdentitySettings};

use super::ServerConfig;

fn build_verifier(
    identity: &IdentitySettings,
    timeout: Duration,
) -> io::Result<Arc<dyn IdentityVerifier>> {
    match identity {
        IdentitySettings::TokenInfo { endpoint, audience } => {
            let verifier = TokenInfoVerifier::new(endpoint.clone(), audience.clone(), timeout)
                .map_err(|err| io::Error::other(format!("identity client: {err}")))?;
            Ok(Arc::new(verifier))
        }
        IdentitySettings::Fixture => {
            warn!("fixture sign-in enabled; tokens are not verified");
            Ok(Arc::new(FixtureIdentityVerifier))
        }
    }
}

fn build_notifier(email: &EmailSettings, timeout: Duration) -> io::Result<Arc<dyn EmailNotifier>> {
    match email {
        EmailSettings::Http {
            endpoint,
            sender,
            api_key,
        } => {
            let sender = Email::new(sender.as_str())
                .map_err(|err| io::Error::other(format!("email sender: {err}")))?;
            let notifier = HttpEmailNotifier::new(endpoint.clone(), sender, timeout)
                .map_err(|err| io::Error::other(format!("email client: {err}")))?;
            Ok(match api_key {
                Some(key) => Arc::new(notifier.with_api_key(key.clone())),
                None => Arc::new(notifier),
            })
        }
        EmailSettings::Logging => Ok(Arc::new(LoggingEmailNotifier)),
    }
}

fn diesel_ports(
    pool: &DbPool,
    verifier: Arc<dyn IdentityVerifier>,
    notifier: Arc<dyn EmailNotifier>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    HttpStatePorts::from_adapters(DrivenAdapters {
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        profiles: Arc::new(DieselUserProfileRepository::new(pool.clone())),
        likes: Arc::new(DieselLikeRepository::new(pool.clone())),
        applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
        verifier,
        notifier,
        clock,
    })
}

fn memory_ports(
    verifier: Arc<dyn IdentityVerifier>,
    notifier: Arc<dyn EmailNotifier>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    let store = Arc::new(MemoryStore::new());
    HttpStatePorts::from_adapters(DrivenAdapters {
        projects: store.clone(),
        profiles: store.clone(),
        likes: store.clone(),
        applications: store,
        verifier,
        notifier,
        clock,
    })
}

/// Build the handler state, choosing PostgreSQL repositories when a pool is
/// configured and the in-memory store otherwise.
///
/// # Errors
///
/// Returns [`io::Error`] when an outbound HTTP client cannot be built or the
/// configured email sender is not a valid address.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let verifier = build_verifier(&config.identity, config.outbound_timeout)?;
    let notifier = build_notifier(&config.email, config.outbound_timeout)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_ports(pool, verifier, notifier, clock)
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            memory_ports(verifier, notifier, clock)
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
