//! Stored Value Module
//!
//! Tagged value type accepted by the instrumented cache, with an explicit
//! byte serialization per variant.

use std::fmt;

use crate::error::{CacheError, Result};

// == Stored Value ==
/// A value accepted by [`Cache::store`](crate::cache::Cache::store).
///
/// Scalars serialize to their ASCII rendering so that a stored integer can
/// be read back with either `get_int` or `get_str`; raw bytes pass through
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Arbitrary bytes, stored verbatim
    Bytes(Vec<u8>),
    /// A UTF-8 string
    Str(String),
    /// A signed integer
    Int(i64),
    /// A floating-point number
    Float(f64),
}

impl StoredValue {
    // == To Bytes ==
    /// Serializes the value to the byte payload written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Bytes(b) => b.clone(),
            StoredValue::Str(s) => s.as_bytes().to_vec(),
            StoredValue::Int(n) => n.to_string().into_bytes(),
            StoredValue::Float(f) => f.to_string().into_bytes(),
        }
    }

    // == Repr ==
    /// Human-readable rendering used in call-history logs.
    ///
    /// Strings are quoted so that `"42"` and `42` remain distinguishable
    /// in a replayed history.
    pub fn repr(&self) -> String {
        match self {
            StoredValue::Bytes(b) => format!("{:?}", b),
            StoredValue::Str(s) => format!("{:?}", s),
            StoredValue::Int(n) => n.to_string(),
            StoredValue::Float(f) => f.to_string(),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        StoredValue::Str(s.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        StoredValue::Str(s)
    }
}

impl From<i64> for StoredValue {
    fn from(n: i64) -> Self {
        StoredValue::Int(n)
    }
}

impl From<f64> for StoredValue {
    fn from(f: f64) -> Self {
        StoredValue::Float(f)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(b: Vec<u8>) -> Self {
        StoredValue::Bytes(b)
    }
}

// == Decode Helpers ==
/// Decodes a stored payload as a UTF-8 string.
pub fn decode_str(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| CacheError::Decode("payload is not valid UTF-8".to_string()))
}

/// Decodes a stored payload as a signed integer.
pub fn decode_int(bytes: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CacheError::Decode("payload is not valid UTF-8".to_string()))?;
    text.parse()
        .map_err(|_| CacheError::Decode(format!("payload is not an integer: {}", text)))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_per_variant() {
        assert_eq!(StoredValue::Str("foo".into()).to_bytes(), b"foo".to_vec());
        assert_eq!(StoredValue::Int(42).to_bytes(), b"42".to_vec());
        assert_eq!(StoredValue::Float(1.5).to_bytes(), b"1.5".to_vec());
        assert_eq!(
            StoredValue::Bytes(vec![0, 159, 146]).to_bytes(),
            vec![0, 159, 146]
        );
    }

    #[test]
    fn test_repr_quotes_strings() {
        assert_eq!(StoredValue::Str("foo".into()).repr(), "\"foo\"");
        assert_eq!(StoredValue::Int(42).repr(), "42");
    }

    #[test]
    fn test_decode_str() {
        assert_eq!(decode_str(b"hello").unwrap(), "hello");
        assert!(matches!(
            decode_str(&[0xff, 0xfe]),
            Err(CacheError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_int() {
        assert_eq!(decode_int(b"42").unwrap(), 42);
        assert_eq!(decode_int(b"-7").unwrap(), -7);
        assert!(matches!(decode_int(b"foo"), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(StoredValue::from("foo"), StoredValue::Str("foo".into()));
        assert_eq!(StoredValue::from(42i64), StoredValue::Int(42));
    }
}
