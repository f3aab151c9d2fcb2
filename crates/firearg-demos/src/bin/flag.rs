//! Prints two Boolean flags as `0`/`1`.

use std::convert::Infallible;

use firearg::{Matches, OptionSpec, Registry, SchemaError};

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("flag")
        .summary("Report which flags are set")
        .option(OptionSpec::flag("a").short('a').help("First flag"))
        .option(OptionSpec::flag("b").short('b').help("Second flag"))
        .build()
}

fn report(m: &Matches) -> Result<String, Infallible> {
    Ok(format!("{} {}", u8::from(m.flag("a")), u8::from(m.flag("b"))))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, report)
}
