//! Command line parsing and responses.

use std::fmt;

use crate::common::config::KEY_LEN;
use crate::common::{Error, Key, Result};

/// One parsed protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `+KEY VALUE` - insert or overwrite.
    Insert { key: Key, value: String },
    /// `-KEY` - tombstone.
    Delete { key: Key },
    /// `?KEY` - point lookup.
    Lookup { key: Key },
    /// `#KEY KEY` - inclusive range count, bounds already ordered.
    Count { begin: Key, end: Key },
    /// Empty line - end the session.
    Quit,
}

impl Command {
    /// Parse one line with its trailing newline already removed.
    ///
    /// # Errors
    /// Returns `Error::InvalidCommand` for an unknown prefix or a line too
    /// short to hold its keys.
    pub fn parse(line: &[u8]) -> Result<Self> {
        let Some((&prefix, rest)) = line.split_first() else {
            return Ok(Command::Quit);
        };

        match prefix {
            b'+' => {
                let key = leading_key(rest, prefix)?;
                // Byte KEY_LEN separates key and value
                let value = rest.get(KEY_LEN + 1..).unwrap_or_default();
                Ok(Command::Insert {
                    key,
                    value: String::from_utf8_lossy(value).into_owned(),
                })
            }
            b'-' => Ok(Command::Delete {
                key: leading_key(rest, prefix)?,
            }),
            b'?' => Ok(Command::Lookup {
                key: leading_key(rest, prefix)?,
            }),
            b'#' => {
                let first = leading_key(rest, prefix)?;
                let second = rest
                    .get(KEY_LEN + 1..)
                    .ok_or_else(|| too_short(prefix))
                    .and_then(|tail| leading_key(tail, prefix))?;
                let (begin, end) = if first <= second {
                    (first, second)
                } else {
                    (second, first)
                };
                Ok(Command::Count { begin, end })
            }
            other => Err(Error::InvalidCommand(format!(
                "unknown command prefix {:?}",
                other as char
            ))),
        }
    }
}

/// The first `KEY_LEN` bytes of `bytes` as a key.
fn leading_key(bytes: &[u8], prefix: u8) -> Result<Key> {
    let raw = bytes.get(..KEY_LEN).ok_or_else(|| too_short(prefix))?;
    Key::new(raw)
}

fn too_short(prefix: u8) -> Error {
    Error::InvalidCommand(format!("'{}' line too short", prefix as char))
}

/// Output produced for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Insert prints nothing.
    Silent,
    /// Delete succeeded.
    Deleted,
    /// Lookup found a live value.
    Found(String),
    /// Delete or lookup found nothing.
    Missing,
    /// Range count result.
    Count(usize),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Silent => Ok(()),
            Response::Deleted => writeln!(f, "-"),
            Response::Found(value) => writeln!(f, "!{}", value),
            Response::Missing => writeln!(f, "?"),
            Response::Count(count) => writeln!(f, "{}", count),
        }
    }
}
