//! Declarative command-line parsing with typed values and generated help.
//!
//! A program declares its options and positionals once in a [`Registry`],
//! then parses argv into [`Matches`], a help text, or a [`ParseError`]:
//!
//! ```
//! use firearg::{OptionSpec, Parsed, Registry, ValueType};
//!
//! let registry = Registry::builder("basic")
//!     .option(OptionSpec::scalar("x", ValueType::Int).short('x').long("x"))
//!     .option(OptionSpec::scalar("y", ValueType::Int).short('y').long("y"))
//!     .build()
//!     .unwrap();
//!
//! let argv = vec!["-x=-3".to_string(), "-y".to_string(), "3".to_string()];
//! let Ok(Parsed::Bound(m)) = registry.parse(&argv) else {
//!     panic!("expected values");
//! };
//! assert_eq!(m.get::<i64>("x"), Some(-3));
//! assert_eq!(m.get::<i64>("y"), Some(3));
//! ```
//!
//! `-h`/`--help` is always registered and takes priority over every error.
//! [`dispatch()`] and [`run()`] turn a parse into process output: help or program
//! output on stdout with exit code 0, or a diagnostic on stderr with
//! [`EXIT_FAILURE`].

pub mod dispatch;
pub mod error;
pub mod help;
mod matches;
pub mod parse;
pub mod registry;
pub mod token;
pub mod value;

pub use dispatch::{EXIT_FAILURE, EXIT_SUCCESS, Outcome, dispatch, dispatch_os, run};
pub use error::{ErrorKind, MatchError, ParseError, SchemaError};
pub use matches::Matches;
pub use parse::{Parsed, parse};
pub use registry::{
    Assignment, Lookup, OptionKind, OptionSpec, PositionalSpec, Registry, RegistryBuilder, Settings,
};
pub use value::{FromValue, Value, ValueType};
