mod runner;
mod suite;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::runner::{Runner, run_suite};
use crate::suite::Suite;

const BIN_DIR_ENV: &str = "FIREARG_BIN_DIR";

#[derive(Parser)]
#[command(name = "firearg-conformance")]
#[command(about = "Check the firearg example programs against their output contracts")]
#[command(version)]
struct Cli {
    /// Directory holding the compiled example programs
    /// [default: $FIREARG_BIN_DIR, then this executable's directory]
    #[arg(long, value_name = "DIR")]
    bin_dir: Option<PathBuf>,

    /// JSON suite to run instead of the built-in one
    #[arg(long, value_name = "FILE")]
    suite: Option<PathBuf>,

    /// Only run the cases of this program
    #[arg(short, long, value_name = "NAME")]
    program: Option<String>,

    /// Print the selected suite as JSON and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let suite = match &cli.suite {
        Some(path) => Suite::load(path)?,
        None => Suite::builtin(),
    };
    let suite = suite.only(cli.program.as_deref())?;

    if cli.list {
        println!("{}", serde_json::to_string_pretty(&suite)?);
        return Ok(());
    }

    let runner = Runner::new(resolve_bin_dir(cli.bin_dir)?);
    info!(
        bin_dir = %runner.bin_dir().display(),
        cases = suite.case_count(),
        "running suite"
    );

    print!("Running tests in {} ...", runner.bin_dir().display());
    std::io::stdout().flush()?;

    let report = run_suite(&runner, &suite);
    if report.is_success() {
        println!(
            " SUCCESS! (ran {} tests with {} checks)",
            report.tests, report.checks
        );
        return Ok(());
    }

    println!(" FAILED");
    for failure in &report.failures {
        eprintln!("  {failure}");
    }
    bail!(
        "{} of {} checks failed",
        report.failures.len(),
        report.failures.len() + report.checks
    )
}

fn resolve_bin_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag.or_else(|| std::env::var_os(BIN_DIR_ENV).map(PathBuf::from)) {
        if !dir.is_dir() {
            bail!("bin directory does not exist: {}", dir.display());
        }
        return Ok(dir);
    }
    let exe = std::env::current_exe().context("failed to locate the current executable")?;
    exe.parent()
        .map(PathBuf::from)
        .context("current executable has no parent directory")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
