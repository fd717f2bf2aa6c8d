//! Environment value parsing for session configuration.

use std::time::Duration;

use actix_web::cookie::SameSite;
use tracing::warn;

use super::{
    BuildMode, SAMESITE_ENV, SESSION_TTL_DEFAULT_HOURS, SessionConfigError, SessionEnv,
    TTL_HOURS_ENV,
};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "an hour count between 1 and 720";
const TTL_MAX_HOURS: u16 = 720;

/// A boolean environment toggle with the value debug builds fall back to.
pub(super) struct BoolToggle {
    name: &'static str,
    debug_default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }

    /// Read the toggle and pass a well-formed value through `validate`.
    pub(super) fn read<E, F>(
        &self,
        env: &E,
        mode: BuildMode,
        validate: F,
    ) -> Result<bool, SessionConfigError>
    where
        E: SessionEnv,
        F: FnOnce(bool) -> Result<bool, SessionConfigError>,
    {
        let label = if self.debug_default {
            "enabled"
        } else {
            "disabled"
        };
        let Some(value) = env.string(self.name) else {
            return debug_warn_or_error(
                mode,
                self.debug_default,
                SessionConfigError::MissingEnv { name: self.name },
                || warn!("{} not set; defaulting to {label}", self.name),
            );
        };
        match parse_bool(&value) {
            Some(flag) => validate(flag),
            None => {
                let error = SessionConfigError::InvalidEnv {
                    name: self.name,
                    value: value.clone(),
                    expected: BOOL_EXPECTED,
                };
                debug_warn_or_error(mode, self.debug_default, error, || {
                    warn!(value = %value, "invalid {}; defaulting to {label}", self.name);
                })
            }
        }
    }
}

/// Return `fallback` after warning in debug builds, `error` otherwise.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without secure cookies; browsers may drop the session"),
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(value = %value, "invalid SESSION_SAMESITE, using default");
            })
        }
    }
}

/// Session lifetime in whole hours; unset means the default in every mode.
pub(super) fn parse_ttl_hours(
    value: Option<String>,
    mode: BuildMode,
) -> Result<Duration, SessionConfigError> {
    let hours = match value {
        None => SESSION_TTL_DEFAULT_HOURS,
        Some(raw) => match raw.trim().parse::<u16>() {
            Ok(hours) if (1..=TTL_MAX_HOURS).contains(&hours) => hours,
            _ => {
                let error = SessionConfigError::InvalidEnv {
                    name: TTL_HOURS_ENV,
                    value: raw.clone(),
                    expected: TTL_EXPECTED,
                };
                debug_warn_or_error(mode, SESSION_TTL_DEFAULT_HOURS, error, || {
                    warn!(value = %raw, "invalid {TTL_HOURS_ENV}; using default");
                })?
            }
        },
    };
    Ok(Duration::from_secs(u64::from(hours) * 3600))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("YES", Some(true))]
    #[case(" 0 ", Some(false))]
    #[case("maybe", None)]
    fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    #[case(None, BuildMode::Release, 2)]
    #[case(Some("12"), BuildMode::Release, 12)]
    #[case(Some("0"), BuildMode::Debug, 2)]
    #[case(Some("forever"), BuildMode::Debug, 2)]
    fn ttl_is_read_in_hours(
        #[case] raw: Option<&str>,
        #[case] mode: BuildMode,
        #[case] expected_hours: u64,
    ) {
        let ttl = parse_ttl_hours(raw.map(str::to_owned), mode).expect("valid ttl");
        assert_eq!(ttl, Duration::from_secs(expected_hours * 3600));
    }

    #[rstest]
    #[case("0")]
    #[case("721")]
    fn release_rejects_ttl_out_of_range(#[case] raw: &str) {
        let err = parse_ttl_hours(Some(raw.to_owned()), BuildMode::Release)
            .expect_err("out of range");
        assert!(matches!(
            err,
            SessionConfigError::InvalidEnv {
                name: TTL_HOURS_ENV,
                ..
            }
        ));
    }

    #[rstest]
    fn debug_tolerates_insecure_none() {
        let same_site = parse_same_site("none".to_owned(), BuildMode::Debug, false, SameSite::Lax)
            .expect("debug tolerates");
        assert_eq!(same_site, SameSite::None);
    }
}
