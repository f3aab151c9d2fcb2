use anyhow::{Context, Result, bail};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

use crate::suite::{Case, Suite};

/// Exit code the example programs use for handled failures.
pub const FAILURE_CODE: i32 = 1;

/// What a program run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observed {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for Observed {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Check `observed` against the contract of `case`.
pub fn verify(case: &Case, observed: &Observed) -> Result<()> {
    match case {
        Case::Equal { stdout, .. } => {
            expect_code(observed, 0)?;
            expect_empty("stderr", &observed.stderr)?;
            if observed.stdout.trim() != stdout.trim() {
                bail!(
                    "expected stdout {:?}, got {:?}",
                    stdout.trim(),
                    observed.stdout.trim()
                );
            }
        }
        Case::HandledFailure { .. } => {
            expect_code(observed, FAILURE_CODE)?;
            expect_empty("stdout", &observed.stdout)?;
            if observed.stderr.is_empty() {
                bail!("expected a diagnostic on stderr");
            }
        }
        Case::HelpSuccess { .. } => {
            expect_code(observed, 0)?;
            expect_empty("stderr", &observed.stderr)?;
            if observed.stdout.trim().is_empty() {
                bail!("expected help text on stdout");
            }
        }
    }
    Ok(())
}

fn expect_code(observed: &Observed, expected: i32) -> Result<()> {
    match observed.code {
        Some(code) if code == expected => Ok(()),
        Some(code) => bail!("expected exit code {expected}, got {code}"),
        None => bail!("expected exit code {expected}, process was terminated by a signal"),
    }
}

fn expect_empty(stream: &str, text: &str) -> Result<()> {
    if !text.is_empty() {
        bail!("expected empty {stream}, got {:?}", text.trim_end());
    }
    Ok(())
}

/// Runs programs out of one directory.
#[derive(Debug, Clone)]
pub struct Runner {
    bin_dir: PathBuf,
}

impl Runner {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn program_path(&self, program: &str) -> PathBuf {
        self.bin_dir
            .join(format!("{program}{}", std::env::consts::EXE_SUFFIX))
    }

    pub fn execute(&self, program: &str, case: &Case) -> Result<Observed> {
        let path = self.program_path(program);
        debug!(program = %path.display(), args = case.args(), "running case");
        let output = Command::new(&path)
            .args(case.argv())
            .output()
            .with_context(|| format!("failed to run {}", path.display()))?;
        Ok(output.into())
    }
}

/// A case whose run did not meet its contract.
#[derive(Debug)]
pub struct Failure {
    pub program: String,
    pub check: &'static str,
    pub args: String,
    pub reason: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] args {:?}: {}",
            self.program, self.check, self.args, self.reason
        )
    }
}

#[derive(Debug, Default)]
pub struct Report {
    /// Programs that were run.
    pub tests: usize,
    /// Cases that met their contract.
    pub checks: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every case in `suite`. A program that cannot be started fails all of
/// its cases; it does not abort the suite.
pub fn run_suite(runner: &Runner, suite: &Suite) -> Report {
    let mut report = Report::default();
    for program in &suite.programs {
        report.tests += 1;
        for case in &program.cases {
            let result = runner
                .execute(&program.program, case)
                .and_then(|observed| verify(case, &observed));
            match result {
                Ok(()) => report.checks += 1,
                Err(err) => report.failures.push(Failure {
                    program: program.program.clone(),
                    check: case.check_name(),
                    args: case.args().to_string(),
                    reason: format!("{err:#}"),
                }),
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::{Observed, Runner, run_suite, verify};
    use crate::suite::{Case, ProgramCases, Suite};

    fn observed(code: i32, stdout: &str, stderr: &str) -> Observed {
        Observed {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn equal_compares_trimmed_stdout() {
        let case = Case::equal("-x 3 -y 4", "3 + 4 = 7");
        assert!(verify(&case, &observed(0, "3 + 4 = 7\n", "")).is_ok());
        assert!(verify(&case, &observed(0, "3 + 4 = 8\n", "")).is_err());
        assert!(verify(&case, &observed(1, "3 + 4 = 7\n", "")).is_err());
        assert!(verify(&case, &observed(0, "3 + 4 = 7\n", "warning\n")).is_err());
    }

    #[test]
    fn handled_failure_needs_exit_one_and_stderr_only() {
        let case = Case::handled_failure("");
        assert!(verify(&case, &observed(1, "", "error: missing\n")).is_ok());
        assert!(verify(&case, &observed(1, "", "")).is_err());
        assert!(verify(&case, &observed(1, "partial\n", "error\n")).is_err());
        assert!(verify(&case, &observed(2, "", "error\n")).is_err());
        assert!(verify(&case, &Observed::default()).is_err());
    }

    #[test]
    fn help_success_needs_stdout_only() {
        let case = Case::help_success("-h");
        assert!(verify(&case, &observed(0, "Usage: basic\n", "")).is_ok());
        assert!(verify(&case, &observed(0, "\n", "")).is_err());
        assert!(verify(&case, &observed(0, "Usage: basic\n", "log\n")).is_err());
        assert!(verify(&case, &observed(1, "", "error\n")).is_err());
    }

    #[test]
    fn failure_message_names_the_problem() {
        let err = verify(&Case::equal("", "1 1"), &observed(0, "0 0\n", "")).unwrap_err();
        assert_eq!(err.to_string(), r#"expected stdout "1 1", got "0 0""#);
    }

    #[test]
    fn missing_programs_fail_their_cases() {
        let dir = std::env::temp_dir().join(format!("firearg-runner-{}", std::process::id()));
        let suite = Suite {
            programs: vec![ProgramCases {
                program: "does_not_exist".to_string(),
                cases: vec![Case::help_success("-h"), Case::handled_failure("")],
            }],
        };
        let report = run_suite(&Runner::new(&dir), &suite);
        assert_eq!(report.tests, 1);
        assert_eq!(report.checks, 0);
        assert_eq!(report.failures.len(), 2);
        assert!(!report.is_success());
        assert!(report.failures[0].reason.contains("failed to run"));
    }
}
