//! Echoes an integer and an optional second one (default 0): `positional 2` prints `2 0`.

use firearg::{MatchError, Matches, PositionalSpec, Registry, SchemaError, ValueType};

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("positional")
        .summary("Echo one or two integers")
        .positional(PositionalSpec::new("x", ValueType::Int).help("First integer"))
        .positional(
            PositionalSpec::new("y", ValueType::Int)
                .default_value(0)
                .help("Second integer"),
        )
        .build()
}

fn echo(m: &Matches) -> Result<String, MatchError> {
    let x: i64 = m.require("x")?;
    let y: i64 = m.require("y")?;
    Ok(format!("{x} {y}"))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, echo)
}
