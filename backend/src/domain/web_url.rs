//! Absolute web links stored on profiles and postings.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum accepted length of a link.
pub const WEB_URL_MAX: usize = 2048;

/// Validation failures for [`WebUrl`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebUrlError {
    /// The link did not parse as an absolute URL.
    #[error("link must be an absolute URL")]
    Malformed,
    /// Only `http` and `https` links are accepted.
    #[error("link must use http or https, got {scheme}")]
    UnsupportedScheme {
        /// Scheme that was supplied.
        scheme: String,
    },
    /// The link exceeded [`WEB_URL_MAX`] characters.
    #[error("link must be at most {max} characters")]
    TooLong {
        /// Upper bound.
        max: usize,
    },
}

/// An `http`/`https` URL such as a profile photo or a team chat invite.
///
/// # Examples
/// ```
/// use jam_backend::domain::WebUrl;
///
/// let link = WebUrl::new("https://open.kakao.com/o/jam").expect("valid link");
/// assert_eq!(link.as_ref(), "https://open.kakao.com/o/jam");
/// assert!(WebUrl::new("ftp://example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl(String);

impl WebUrl {
    /// Validate and construct a link.
    pub fn new(raw: impl Into<String>) -> Result<Self, WebUrlError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > WEB_URL_MAX {
            return Err(WebUrlError::TooLong { max: WEB_URL_MAX });
        }
        let parsed = Url::parse(trimmed).map_err(|_| WebUrlError::Malformed)?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self(trimmed.to_owned())),
            other => Err(WebUrlError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }
}

impl AsRef<str> for WebUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WebUrl> for String {
    fn from(value: WebUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for WebUrl {
    type Error = WebUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
