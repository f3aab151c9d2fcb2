//! Mapping of parse results onto process output and exit status.
//!
//! An [`Outcome`] writes exactly one of stdout/stderr, exactly once: success
//! output (help text or program output) never shares a run with a diagnostic.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::process;

use tracing::debug;

use crate::error::ParseError;
use crate::matches::Matches;
use crate::parse::{Parsed, parse};
use crate::registry::Registry;

pub const EXIT_SUCCESS: i32 = 0;
/// Used for every parse, validation and program logic failure.
pub const EXIT_FAILURE: i32 = 1;

/// What a run prints and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

impl Outcome {
    /// Success with `text` on stdout, newline-terminated.
    pub fn success(text: impl Into<String>) -> Self {
        let mut stdout = text.into();
        if !stdout.ends_with('\n') {
            stdout.push('\n');
        }
        Self {
            code: EXIT_SUCCESS,
            stdout,
            stderr: String::new(),
        }
    }

    /// Failure with a diagnostic on stderr.
    pub fn failure(program: &str, error: impl fmt::Display) -> Self {
        Self {
            code: EXIT_FAILURE,
            stdout: String::new(),
            stderr: format!("error: {error}\n\nFor more information, try '{program} --help'.\n"),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn is_success(&self) -> bool {
        self.code == EXIT_SUCCESS
    }

    /// Write the outcome to the process streams.
    pub fn write(&self) -> io::Result<()> {
        if self.is_success() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(self.stdout.as_bytes())?;
            stdout.flush()
        } else {
            let mut stderr = io::stderr().lock();
            stderr.write_all(self.stderr.as_bytes())?;
            stderr.flush()
        }
    }

    /// Write the outcome and terminate the process with its exit code.
    pub fn exit(self) -> ! {
        let code = match self.write() {
            Ok(()) => self.code,
            Err(_) => EXIT_FAILURE,
        };
        process::exit(code)
    }
}

/// Parse `argv` (program name excluded) and, on success, run `logic` on the
/// bound values. The string returned by `logic` becomes the success output.
pub fn dispatch<F, E>(registry: &Registry, argv: &[String], logic: F) -> Outcome
where
    F: FnOnce(&Matches) -> Result<String, E>,
    E: fmt::Display,
{
    match parse(registry, argv) {
        Ok(Parsed::Help(text)) => Outcome::success(text),
        Ok(Parsed::Bound(matches)) => match logic(&matches) {
            Ok(out) => Outcome::success(out),
            Err(err) => {
                debug!(program = registry.program(), error = %err, "program logic failed");
                Outcome::failure(registry.program(), err)
            }
        },
        Err(err) => {
            debug!(program = registry.program(), kind = ?err.kind(), "parse failed");
            Outcome::failure(registry.program(), err)
        }
    }
}

/// Like [`dispatch`], for raw OS arguments.
///
/// An argument that is not valid UTF-8 fails the run as a malformed token
/// instead of being bound in lossy form.
pub fn dispatch_os<I, F, E>(registry: &Registry, args: I, logic: F) -> Outcome
where
    I: IntoIterator<Item = OsString>,
    F: FnOnce(&Matches) -> Result<String, E>,
    E: fmt::Display,
{
    let mut argv = Vec::new();
    for arg in args {
        match arg.into_string() {
            Ok(arg) => argv.push(arg),
            Err(raw) => {
                let err = ParseError::MalformedToken {
                    token: raw.to_string_lossy().into_owned(),
                };
                debug!(program = registry.program(), "argument is not valid UTF-8");
                return Outcome::failure(registry.program(), err);
            }
        }
    }
    dispatch(registry, &argv, logic)
}

/// Run `logic` against the process arguments and exit.
pub fn run<F, E>(registry: &Registry, logic: F) -> !
where
    F: FnOnce(&Matches) -> Result<String, E>,
    E: fmt::Display,
{
    dispatch_os(registry, std::env::args_os().skip(1), logic).exit()
}
