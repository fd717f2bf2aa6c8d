//! Transactional email adapters.
//!
//! `HttpEmailNotifier` posts messages to a JSON email API;
//! `LoggingEmailNotifier` records them in the log when no API is
//! configured.

mod http_notifier;
mod logging_notifier;

pub use http_notifier::HttpEmailNotifier;
pub use logging_notifier::LoggingEmailNotifier;
