//! Adds two required integers: `basic -x 3 -y 4` prints `3 + 4 = 7`.

use firearg::{Matches, OptionSpec, Registry, SchemaError, ValueType};

fn registry() -> Result<Registry, SchemaError> {
    Registry::builder("basic")
        .summary("Add two integers")
        .option(
            OptionSpec::scalar("x", ValueType::Int)
                .short('x')
                .long("x")
                .help("First operand"),
        )
        .option(
            OptionSpec::scalar("y", ValueType::Int)
                .short('y')
                .long("y")
                .help("Second operand"),
        )
        .build()
}

fn add(m: &Matches) -> Result<String, String> {
    let x = m.require::<i64>("x").map_err(|err| err.to_string())?;
    let y = m.require::<i64>("y").map_err(|err| err.to_string())?;
    let sum = x
        .checked_add(y)
        .ok_or_else(|| format!("{x} + {y} does not fit in a 64-bit integer"))?;
    Ok(format!("{x} + {y} = {sum}"))
}

fn main() {
    firearg_demos::init_tracing();
    let registry = firearg_demos::registry_or_exit(registry());
    firearg::run(&registry, add)
}
