//! Line-oriented command shell over a [`BTree`].
//!
//! The shell is a thin driver: it reads one command per line, applies it
//! to the tree and writes the response. The index itself never depends on
//! it.
//!
//! # Protocol
//! ```text
//! +2020-01-01 00:00:00 A      insert or overwrite, no output
//! -2020-01-01 00:00:00        delete          -> "-" or "?"
//! ?2020-01-01 00:00:00        lookup          -> "!A" or "?"
//! #2020-01-01 00:00:00 2020-03-01 00:00:00    -> count in range
//! (empty line / end of input) end the session, exit status 0
//! ```
//! Any malformed line prints [`INVALID_COMMAND_MESSAGE`] and ends the
//! session with exit status 1.

mod command;

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::common::Result;
use crate::BTree;

pub use command::{Command, Response};

/// Printed (without a trailing newline) before rejecting a line.
pub const INVALID_COMMAND_MESSAGE: &str = "This is an invalid command. The program will now exit";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Empty line or end of input.
    Finished,
    /// A malformed line stopped the session.
    Rejected,
}

impl ExitStatus {
    /// Process exit code for this status.
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Finished => 0,
            ExitStatus::Rejected => 1,
        }
    }
}

/// Apply one command to the tree.
pub fn execute(tree: &mut BTree, command: Command) -> Response {
    match command {
        Command::Insert { key, value } => {
            tree.insert(key, value);
            Response::Silent
        }
        Command::Delete { key } => {
            if tree.delete(&key) {
                Response::Deleted
            } else {
                Response::Missing
            }
        }
        Command::Lookup { key } => match tree.lookup(&key) {
            Some(value) => Response::Found(value.to_owned()),
            None => Response::Missing,
        },
        Command::Count { begin, end } => Response::Count(tree.range_count(&begin, &end)),
        Command::Quit => Response::Silent,
    }
}

/// Run a session until an empty line, end of input, or a bad command.
///
/// # Errors
/// Only I/O failures on `input` or `output` are errors; a malformed line
/// is reported through [`ExitStatus::Rejected`].
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    tree: &mut BTree,
) -> Result<ExitStatus> {
    let mut line = Vec::new();
    let mut processed = 0u64;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                warn!(error = %err, line = processed + 1, "rejecting input");
                output.write_all(INVALID_COMMAND_MESSAGE.as_bytes())?;
                output.flush()?;
                return Ok(ExitStatus::Rejected);
            }
        };

        let response = execute(tree, command);
        write!(output, "{}", response)?;
        processed += 1;
    }

    output.flush()?;
    debug!(
        processed,
        live = tree.live_count(),
        stats = %tree.stats().snapshot(),
        "session finished"
    );
    Ok(ExitStatus::Finished)
}
