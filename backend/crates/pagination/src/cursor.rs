//! Opaque cursor encoding.
//!
//! A cursor is the JSON encoding of a typed key, wrapped in URL-safe base64
//! without padding. Clients must treat the token as opaque; servers decode it
//! back into the key type they issued.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failures raised while encoding or decoding cursor tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token was empty or whitespace.
    #[error("cursor must not be empty")]
    Empty,
    /// The token was not valid URL-safe base64.
    #[error("cursor is not valid base64: {message}")]
    Base64 {
        /// Decoder diagnostic.
        message: String,
    },
    /// The decoded bytes did not describe the expected key.
    #[error("cursor payload is malformed: {message}")]
    Payload {
        /// Deserialiser diagnostic.
        message: String,
    },
    /// The key could not be serialised.
    #[error("cursor key could not be encoded: {message}")]
    Encode {
        /// Serialiser diagnostic.
        message: String,
    },
}

/// Typed pagination cursor.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let token = Cursor::new(42_u64).encode().expect("encodable key");
/// let decoded: Cursor<u64> = Cursor::decode(&token).expect("valid token");
/// assert_eq!(*decoded.key(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap a key.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the wrapped key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Consume the cursor and return the key.
    #[must_use]
    pub fn into_inner(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Render the cursor as an opaque token.
    ///
    /// # Errors
    /// Returns [`CursorError::Encode`] when the key cannot be serialised.
    pub fn encode(&self) -> Result<String, CursorError> {
        let bytes = serde_json::to_vec(&self.key).map_err(|err| CursorError::Encode {
            message: err.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Parse an opaque token produced by [`Cursor::encode`].
    ///
    /// # Errors
    /// Returns [`CursorError::Empty`] for blank input,
    /// [`CursorError::Base64`] for undecodable input and
    /// [`CursorError::Payload`] when the payload does not match `K`.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(CursorError::Empty);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(trimmed)
            .map_err(|err| CursorError::Base64 {
                message: err.to_string(),
            })?;
        let key = serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(Self { key })
    }
}
