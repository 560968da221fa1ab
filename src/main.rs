//! tallytree command shell.
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr and are filtered with `RUST_LOG` (e.g. `RUST_LOG=tallytree=debug`).

use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use tallytree::shell;
use tallytree::BTree;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut tree = BTree::new();
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    match shell::run(stdin, stdout, &mut tree) {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            error!(error = %err, "session aborted");
            ExitCode::FAILURE
        }
    }
}
