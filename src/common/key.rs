//! Fixed-width index key.

use std::fmt;
use std::str::FromStr;

use crate::common::config::KEY_LEN;
use crate::common::{Error, Result};

/// A fixed-width key: exactly [`KEY_LEN`] bytes.
///
/// Keys compare byte-wise lexicographically with no normalization, so
/// zero-padded timestamps such as `2020-01-01 00:00:00` sort chronologically.
/// A `Key` can only be built from input of the right width, which keeps
/// malformed keys out of the index entirely.
///
/// # Example
/// ```
/// use tallytree::Key;
///
/// let a: Key = "2020-01-01 00:00:00".parse().unwrap();
/// let b: Key = "2020-03-01 00:00:00".parse().unwrap();
/// assert!(a < b);
/// assert!("2020-01-01".parse::<Key>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Build a key from exactly `KEY_LEN` bytes.
    ///
    /// # Errors
    /// Returns `Error::KeyLength` if `bytes` is not `KEY_LEN` long.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; KEY_LEN] = bytes.try_into().map_err(|_| Error::KeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Key(raw))
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::new(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Key::new(bytes)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", String::from_utf8_lossy(&self.0))
    }
}
