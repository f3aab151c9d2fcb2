use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cases grouped by the program they run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    #[serde(default)]
    pub programs: Vec<ProgramCases>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCases {
    /// Executable name inside the bin directory, without platform suffix.
    pub program: String,
    #[serde(default)]
    pub cases: Vec<Case>,
}

/// One invocation and the contract it must satisfy.
///
/// `args` is split on whitespace; there is no quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "kebab-case")]
pub enum Case {
    /// Exit 0, trimmed stdout equal to `stdout`, empty stderr.
    Equal {
        #[serde(default)]
        args: String,
        stdout: String,
    },
    /// Exit 1, empty stdout, non-empty stderr.
    HandledFailure {
        #[serde(default)]
        args: String,
    },
    /// Exit 0, non-empty stdout, empty stderr.
    HelpSuccess {
        #[serde(default)]
        args: String,
    },
}

impl Case {
    pub fn equal(args: &str, stdout: &str) -> Self {
        Self::Equal {
            args: args.to_string(),
            stdout: stdout.to_string(),
        }
    }

    pub fn handled_failure(args: &str) -> Self {
        Self::HandledFailure {
            args: args.to_string(),
        }
    }

    pub fn help_success(args: &str) -> Self {
        Self::HelpSuccess {
            args: args.to_string(),
        }
    }

    pub fn args(&self) -> &str {
        match self {
            Self::Equal { args, .. } | Self::HandledFailure { args } | Self::HelpSuccess { args } => {
                args
            }
        }
    }

    pub fn argv(&self) -> Vec<&str> {
        self.args().split_whitespace().collect()
    }

    pub fn check_name(&self) -> &'static str {
        match self {
            Self::Equal { .. } => "equal",
            Self::HandledFailure { .. } => "handled-failure",
            Self::HelpSuccess { .. } => "help-success",
        }
    }
}

impl Suite {
    /// The contracts of the bundled example programs.
    pub fn builtin() -> Self {
        let program = |name: &str, cases: Vec<Case>| ProgramCases {
            program: name.to_string(),
            cases,
        };

        Self {
            programs: vec![
                program(
                    "all_combinations",
                    vec![
                        Case::help_success("-h"),
                        Case::equal("-i=3 7", "i=3\ndef-r=1\nn=7"),
                        Case::handled_failure("-i 3 7"),
                        Case::handled_failure("-i=3 -7"),
                    ],
                ),
                program(
                    "basic",
                    vec![
                        Case::equal("-x 3 -y 4", "3 + 4 = 7"),
                        Case::equal("-x -3 -y 3", "-3 + 3 = 0"),
                        Case::equal("-x=-3 -y=3", "-3 + 3 = 0"),
                        Case::handled_failure(""),
                        Case::handled_failure("-x 3"),
                        Case::handled_failure("-y 4"),
                        Case::handled_failure("-x test"),
                        Case::handled_failure("-x"),
                        Case::handled_failure("--undefined 0"),
                        Case::help_success("-h"),
                        Case::help_success("--help"),
                        Case::help_success("-x 0 -h"),
                        Case::help_success("-h --undefined"),
                    ],
                ),
                program(
                    "flag",
                    vec![
                        Case::help_success("-h"),
                        Case::equal("", "0 0"),
                        Case::equal("-a -b", "1 1"),
                        Case::equal("-ba", "1 1"),
                        Case::equal("-b", "0 1"),
                        Case::handled_failure("-a 1"),
                    ],
                ),
                program(
                    "optional_and_default",
                    vec![
                        Case::help_success("-h"),
                        Case::equal("", "false false"),
                        Case::equal("--default 1", "false true"),
                        Case::equal("--optional 1", "true false"),
                        Case::equal("--optional 1 --default 1", "true true"),
                    ],
                ),
                program(
                    "positional",
                    vec![
                        Case::help_success("-h"),
                        Case::handled_failure(""),
                        Case::handled_failure("test"),
                        Case::equal("2", "2 0"),
                        Case::equal("2 3", "2 3"),
                        Case::handled_failure("2 3 4"),
                        Case::equal("-1 -3", "-1 -3"),
                    ],
                ),
                program(
                    "vector_positional",
                    vec![
                        Case::help_success("-h"),
                        Case::equal("", ""),
                        Case::equal("b a", "b a"),
                        Case::equal("b a -o", "b\na"),
                        Case::equal("b a -s", "a b"),
                        Case::equal("b a -os", "a\nb"),
                    ],
                ),
            ],
        }
    }

    /// Load a suite from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read suite: {}", path.display()))?;
        let suite: Suite = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse suite: {}", path.display()))?;
        suite.validate()?;
        Ok(suite)
    }

    /// Keep only the cases of `program`, if given.
    pub fn only(self, program: Option<&str>) -> Result<Self> {
        let Some(name) = program else {
            return Ok(self);
        };
        let programs: Vec<ProgramCases> = self
            .programs
            .into_iter()
            .filter(|p| p.program == name)
            .collect();
        if programs.is_empty() {
            bail!("suite has no cases for program '{name}'");
        }
        Ok(Self { programs })
    }

    pub fn case_count(&self) -> usize {
        self.programs.iter().map(|p| p.cases.len()).sum()
    }

    fn validate(&self) -> Result<()> {
        for p in &self.programs {
            if p.program.is_empty()
                || p.program.contains(['/', '\\'])
                || p.program.chars().any(char::is_whitespace)
            {
                bail!("invalid program name in suite: {:?}", p.program);
            }
        }
        Ok(())
    }
}
