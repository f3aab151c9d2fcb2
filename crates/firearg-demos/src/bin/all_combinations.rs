//! Declares one argument of every kind; values must be attached with `=`.
//!
//! Prints each bound value as `name=value`, in declaration order.

use std::convert::Infallible;

use firearg::{
    Assignment, Matches, OptionSpec, PositionalSpec, Registry, SchemaError, ValueType,
};

const NAMES: [&str; 5] = ["i", "def-r", "opt-s", "n", "m"];

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("all_combinations")
        .summary("Every kind of argument at once")
        .assignment(Assignment::EqualsOnly)
        .option(OptionSpec::scalar("i", ValueType::Int).short('i').help("Integer"))
        .option(
            OptionSpec::scalar("def-r", ValueType::Float)
                .long("def-r")
                .default_value(1.0)
                .help("Real value with default"),
        )
        .option(
            OptionSpec::scalar("opt-s", ValueType::Str)
                .long("opt-s")
                .optional()
                .help("Optional string"),
        )
        .positional(PositionalSpec::new("n", ValueType::UInt).help("Positive integer"))
        .positional(
            PositionalSpec::new("m", ValueType::Int)
                .optional()
                .help("Optional integer"),
        )
        .build()
}

fn show(m: &Matches) -> Result<String, Infallible> {
    let lines: Vec<String> = NAMES
        .iter()
        .filter_map(|name| m.value(name).map(|v| format!("{name}={v}")))
        .collect();
    Ok(lines.join("\n"))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, show)
}
