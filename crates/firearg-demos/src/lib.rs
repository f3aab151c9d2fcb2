//! Shared setup for the example programs.
//!
//! Each program in `src/bin` declares a registry, hands it to
//! [`firearg::run`] together with its logic, and lets the dispatcher decide
//! what reaches stdout, stderr and the exit code.

use std::process;

use firearg::{EXIT_FAILURE, Registry, SchemaError};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter for the example programs.
pub const LOG_ENV: &str = "FIREARG_LOG";

/// Log to stderr, filtered by `FIREARG_LOG` (default `warn`).
///
/// The engine only logs at `debug`/`trace`, so by default nothing is written
/// and stderr stays empty on success.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Unwrap a registry declaration, exiting with a diagnostic if it is invalid.
pub fn registry_or_exit(registry: Result<Registry, SchemaError>) -> Registry {
    match registry {
        Ok(registry) => registry,
        Err(err) => {
            tracing::debug!(error = %err, "invalid argument declarations");
            eprintln!("error: invalid argument declarations: {err}");
            process::exit(EXIT_FAILURE);
        }
    }
}
