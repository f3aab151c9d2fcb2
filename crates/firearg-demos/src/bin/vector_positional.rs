//! Prints every positional value, optionally sorted and one per line.

use firearg::{MatchError, Matches, OptionSpec, PositionalSpec, Registry, SchemaError, ValueType};

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("vector_positional")
        .summary("Print the given values")
        .option(OptionSpec::flag("one-per-line").short('o').help("Print each value on its own line"))
        .option(OptionSpec::flag("sort").short('s').help("Sort values before printing"))
        .positional(
            PositionalSpec::new("values", ValueType::Str)
                .variadic()
                .help("Values to print"),
        )
        .build()
}

fn print(m: &Matches) -> Result<String, MatchError> {
    let mut values: Vec<String> = m.require("values")?;
    if m.flag("sort") {
        values.sort();
    }
    let sep = if m.flag("one-per-line") { "\n" } else { " " };
    Ok(values.join(sep))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, print)
}
