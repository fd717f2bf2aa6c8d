//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::json;

use super::state::{DrivenAdapters, HttpState, HttpStatePorts};
use crate::domain::ports::{FixtureEmailNotifier, FixtureIdentityVerifier};
use crate::outbound::memory::MemoryStore;

/// Session middleware with a fresh key, cookie name `session` and the
/// `Secure` flag disabled for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state backed by a fresh in-memory store and fixture sign-in.
pub fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::new(HttpStatePorts::from_adapters(DrivenAdapters {
        projects: store.clone(),
        profiles: store.clone(),
        likes: store.clone(),
        applications: store,
        verifier: Arc::new(FixtureIdentityVerifier),
        notifier: Arc::new(FixtureEmailNotifier),
        clock: Arc::new(DefaultClock),
    }))
}

/// Full `/api/v1` surface over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(super::configure_api),
        )
}

/// Sign in as the fixture identity `subject` and return the session cookie.
pub async fn sign_in<S>(app: &S, subject: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "idToken": format!("fixture:{subject}:{subject}@example.com") }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign-in failed: {}", response.status());
    session_cookie(&response).expect("session cookie set")
}
