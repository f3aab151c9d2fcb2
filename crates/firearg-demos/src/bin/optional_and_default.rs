//! Reports whether `--optional` and `--default` were given on the command line.

use std::convert::Infallible;

use firearg::{Matches, OptionSpec, Registry, SchemaError, ValueType};

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("optional_and_default")
        .summary("Tell optional and defaulted options apart")
        .option(
            OptionSpec::scalar("optional", ValueType::Int)
                .long("optional")
                .optional()
                .help("Optional value"),
        )
        .option(
            OptionSpec::scalar("default", ValueType::Int)
                .long("default")
                .default_value(0)
                .help("Value with a default"),
        )
        .build()
}

fn report(m: &Matches) -> Result<String, Infallible> {
    // `default` is always bound; only `is_explicit` tells whether it was given.
    Ok(format!(
        "{} {}",
        m.contains("optional"),
        m.is_explicit("default")
    ))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, report)
}
