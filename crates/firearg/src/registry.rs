//! Declared schema: options, positionals and the built-in help option.
//!
//! A [`Registry`] is built once at program start and only read afterwards, so
//! a single instance can be shared across any number of parses.

use std::collections::{HashMap, HashSet};

use crate::error::{ParseError, SchemaError};
use crate::parse::{self, Parsed};
use crate::value::{Value, ValueType};

const BUILTIN_HELP_NAME: &str = "__firearg_help";

/// What an option binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence flag, takes no value.
    Boolean,
    /// Exactly one value per occurrence; the last occurrence wins.
    Scalar(ValueType),
    /// One value per occurrence, accumulated in order.
    Vector(ValueType),
}

/// How valued options receive their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assignment {
    /// `-x 3`, `-x=3` and `-x3` are all accepted.
    #[default]
    SpaceOrEquals,
    /// Only inline values (`-x=3`, `-x3`); the following token is never consumed.
    EqualsOnly,
}

/// Parser behavior carried by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub assignment: Assignment,
}

/// A named option (`-x`, `--long`).
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    name: String,
    short: Option<char>,
    long: Option<String>,
    help: String,
    kind: OptionKind,
    default: Option<Value>,
    optional: bool,
}

impl OptionSpec {
    fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            short: None,
            long: None,
            help: String::new(),
            kind,
            default: None,
            optional: false,
        }
    }

    /// A Boolean presence flag. Binds `false` when absent.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean)
    }

    /// An option taking exactly one value. Required unless defaulted or
    /// marked [`optional`](Self::optional).
    pub fn scalar(name: impl Into<String>, ty: ValueType) -> Self {
        Self::new(name, OptionKind::Scalar(ty))
    }

    /// An option that may occur any number of times.
    pub fn vector(name: impl Into<String>, ty: ValueType) -> Self {
        Self::new(name, OptionKind::Vector(ty))
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Long name, with or without the leading `--`.
    pub fn long(mut self, long: impl AsRef<str>) -> Self {
        self.long = Some(normalize_long(long.as_ref()));
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Not required, and left unbound when absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn takes_value(&self) -> bool {
        !matches!(self.kind, OptionKind::Boolean)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, OptionKind::Scalar(_)) && self.default.is_none() && !self.optional
    }

    /// `--long` when available, `-s` otherwise.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => self.name.clone(),
        }
    }

    fn default_matches_kind(&self) -> Result<(), SchemaError> {
        let Some(default) = &self.default else {
            return Ok(());
        };
        let (ok, expected) = match self.kind {
            OptionKind::Boolean => (matches!(default, Value::Bool(_)), "a bool".to_string()),
            OptionKind::Scalar(ty) => (default.is_of(ty), format!("of type {ty}")),
            OptionKind::Vector(ty) => (default.is_list_of(ty), format!("a list of {ty}")),
        };
        if ok {
            Ok(())
        } else {
            Err(SchemaError::DefaultTypeMismatch {
                name: self.name.clone(),
                expected,
            })
        }
    }
}

/// A positional slot, filled in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalSpec {
    name: String,
    help: String,
    ty: ValueType,
    default: Option<Value>,
    optional: bool,
    variadic: bool,
}

impl PositionalSpec {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            ty,
            default: None,
            optional: false,
            variadic: false,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Capture every remaining positional token. Must be the last slot.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn is_required(&self) -> bool {
        !self.variadic && self.default.is_none() && !self.optional
    }

    /// `<name>`, `[name]` or `[name]...`.
    pub fn display_name(&self) -> String {
        if self.variadic {
            format!("[{}]...", self.name)
        } else if self.is_required() {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }

    fn default_matches_type(&self) -> Result<(), SchemaError> {
        let Some(default) = &self.default else {
            return Ok(());
        };
        let ok = if self.variadic {
            default.is_list_of(self.ty)
        } else {
            default.is_of(self.ty)
        };
        if ok {
            Ok(())
        } else {
            Err(SchemaError::DefaultTypeMismatch {
                name: self.name.clone(),
                expected: format!("of type {}", self.ty),
            })
        }
    }
}

/// Result of resolving an option token.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'r> {
    Help,
    Spec(&'r OptionSpec),
}

/// The declared schema of one program.
#[derive(Debug, Clone)]
pub struct Registry {
    program: String,
    summary: String,
    settings: Settings,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    help: OptionSpec,
    names: HashSet<String>,
    shorts: HashMap<char, usize>,
    longs: HashMap<String, usize>,
}

impl Registry {
    /// An empty registry holding only the built-in `-h`/`--help` option.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            summary: String::new(),
            settings: Settings::default(),
            options: Vec::new(),
            positionals: Vec::new(),
            help: builtin_help(),
            names: HashSet::new(),
            shorts: HashMap::new(),
            longs: HashMap::new(),
        }
    }

    pub fn builder(program: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            registry: Self::new(program),
            error: None,
        }
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn register_option(&mut self, spec: OptionSpec) -> Result<(), SchemaError> {
        if spec.short.is_none() && spec.long.is_none() {
            return Err(SchemaError::Unnamed { name: spec.name });
        }
        if let Some(short) = spec.short {
            if short.is_whitespace() || short.is_ascii_digit() || short == '-' || short == '=' {
                return Err(SchemaError::InvalidShort { short });
            }
        }
        if let Some(long) = &spec.long {
            if long.is_empty() || long.contains('=') || long.chars().any(char::is_whitespace) {
                return Err(SchemaError::InvalidLong { long: long.clone() });
            }
        }
        self.claim_name(&spec.name)?;
        if let Some(short) = spec.short {
            if self.help.short == Some(short) || self.shorts.contains_key(&short) {
                return Err(SchemaError::DuplicateName {
                    name: format!("-{short}"),
                });
            }
        }
        if let Some(long) = &spec.long {
            if self.help.long.as_deref() == Some(long.as_str()) || self.longs.contains_key(long) {
                return Err(SchemaError::DuplicateName {
                    name: format!("--{long}"),
                });
            }
        }
        spec.default_matches_kind()?;

        let idx = self.options.len();
        if let Some(short) = spec.short {
            self.shorts.insert(short, idx);
        }
        if let Some(long) = &spec.long {
            self.longs.insert(long.clone(), idx);
        }
        self.names.insert(spec.name.clone());
        self.options.push(spec);
        Ok(())
    }

    pub fn register_positional(&mut self, spec: PositionalSpec) -> Result<(), SchemaError> {
        self.claim_name(&spec.name)?;
        if let Some(last) = self.positionals.last() {
            if last.variadic {
                return Err(SchemaError::PositionalAfterVariadic {
                    name: spec.name,
                    variadic: last.name.clone(),
                });
            }
            if spec.is_required() && !last.is_required() {
                return Err(SchemaError::RequiredAfterOptional {
                    name: spec.name,
                    optional: last.name.clone(),
                });
            }
        }
        spec.default_matches_type()?;

        self.names.insert(spec.name.clone());
        self.positionals.push(spec);
        Ok(())
    }

    fn claim_name(&self, name: &str) -> Result<(), SchemaError> {
        if name == BUILTIN_HELP_NAME || self.names.contains(name) {
            return Err(SchemaError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn lookup_short(&self, short: char) -> Option<Lookup<'_>> {
        if self.help.short == Some(short) {
            return Some(Lookup::Help);
        }
        self.shorts
            .get(&short)
            .map(|&idx| Lookup::Spec(&self.options[idx]))
    }

    pub fn lookup_long(&self, long: &str) -> Option<Lookup<'_>> {
        if self.help.long.as_deref() == Some(long) {
            return Some(Lookup::Help);
        }
        self.longs
            .get(long)
            .map(|&idx| Lookup::Spec(&self.options[idx]))
    }

    /// Parse `argv` (program name excluded) against this registry.
    pub fn parse(&self, argv: &[String]) -> Result<Parsed, ParseError> {
        parse::parse(self, argv)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// User-declared options, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.positionals
    }

    pub fn help_option(&self) -> &OptionSpec {
        &self.help
    }
}

/// Fluent construction of a [`Registry`]; the first schema error is kept and
/// returned by [`build`](Self::build).
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: Registry,
    error: Option<SchemaError>,
}

impl RegistryBuilder {
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.registry.set_summary(summary);
        self
    }

    pub fn assignment(mut self, assignment: Assignment) -> Self {
        self.registry.settings.assignment = assignment;
        self
    }

    pub fn option(mut self, spec: OptionSpec) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.registry.register_option(spec) {
                self.error = Some(err);
            }
        }
        self
    }

    pub fn positional(mut self, spec: PositionalSpec) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.registry.register_positional(spec) {
                self.error = Some(err);
            }
        }
        self
    }

    pub fn build(self) -> Result<Registry, SchemaError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.registry),
        }
    }
}

fn builtin_help() -> OptionSpec {
    OptionSpec::flag(BUILTIN_HELP_NAME)
        .short('h')
        .long("help")
        .help("Show help information")
}

fn normalize_long(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix("--").unwrap_or(trimmed).to_string()
}
