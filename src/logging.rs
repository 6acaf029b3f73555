//! Tracing setup for the console.
//!
//! Log lines go to stderr so they never interleave with the menu on stdout.
//! `RUST_LOG` controls the filter (default: warn).

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
