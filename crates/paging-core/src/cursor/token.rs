//! Continuation token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{HasId, PagingError, PagingResult};

/// A position in the result set: the identifier of the last delivered row.
///
/// The external form is the decimal string of the identifier. Any other
/// string is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cursor(i64);

impl Cursor {
    /// Creates a cursor positioned after the given identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Creates a cursor positioned after the given row.
    pub fn after<T: HasId>(row: &T) -> Self {
        Self(row.id())
    }

    /// Returns the identifier of the last delivered row.
    #[inline]
    pub fn id(&self) -> i64 {
        self.0
    }

    /// Encodes the cursor as a continuation token.
    pub fn encode(&self) -> String {
        self.0.to_string()
    }

    /// Decodes a continuation token.
    ///
    /// An empty token denotes the start of the sequence and decodes to `None`.
    pub fn decode(token: &str) -> PagingResult<Option<Self>> {
        if token.is_empty() {
            return Ok(None);
        }

        token.parse().map(Some)
    }
}

impl FromStr for Cursor {
    type Err = PagingError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        token
            .parse::<i64>()
            .map(Self)
            .map_err(|source| PagingError::MalformedCursor {
                cursor: token.to_owned(),
                source,
            })
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.encode()
    }
}

impl TryFrom<String> for Cursor {
    type Error = PagingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_decimal() {
        assert_eq!(Cursor::new(5).encode(), "5");
        assert_eq!(Cursor::new(1_000_000).to_string(), "1000000");
    }

    #[test]
    fn test_decode_empty_is_start() {
        assert_eq!(Cursor::decode("").ok(), Some(None));
    }

    #[test]
    fn test_decode_number() {
        let cursor = Cursor::decode("42").ok().flatten();
        assert_eq!(cursor.map(|c| c.id()), Some(42));
    }

    #[test]
    fn test_decode_invalid() {
        for token in ["abc", "5a", " 5", "5.0", "0x10", "99999999999999999999"] {
            let error = Cursor::decode(token).unwrap_err();
            assert!(
                matches!(&error, PagingError::MalformedCursor { cursor, .. } if cursor == token),
                "{token:?} should be malformed, got {error}"
            );
        }
    }

    #[test]
    fn test_serde_uses_token_form() {
        let json = serde_json::to_string(&Cursor::new(7)).expect("cursor serializes");
        assert_eq!(json, "\"7\"");

        let cursor: Cursor = serde_json::from_str("\"7\"").expect("cursor deserializes");
        assert_eq!(cursor.id(), 7);
        assert!(serde_json::from_str::<Cursor>("\"seven\"").is_err());
    }
}
