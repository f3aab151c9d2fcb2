//! Binding of classified tokens against a registry.
//!
//! Parsing runs in two passes over the classified stream. The first pass only
//! looks for the help option; if it appears anywhere, help wins over every
//! other outcome. The second pass binds tokens left to right and stops at the
//! first error, then fills defaults and checks required specs.

use tracing::debug;

use crate::error::ParseError;
use crate::help;
use crate::matches::Matches;
use crate::registry::{Assignment, Lookup, OptionKind, Registry};
use crate::token::{Token, classify};
use crate::value::Value;

/// Successful outcome of a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Bound(Matches),
    /// Rendered help text.
    Help(String),
}

/// Parse `argv` (program name excluded) against `registry`.
pub fn parse(registry: &Registry, argv: &[String]) -> Result<Parsed, ParseError> {
    let tokens = classify(argv, registry);

    if requests_help(registry, &tokens) {
        debug!(program = registry.program(), "help requested");
        return Ok(Parsed::Help(help::render(registry)));
    }

    let matches = Binder::new(registry).run(&tokens)?;
    debug!(program = registry.program(), bound = matches.len(), "argv bound");
    Ok(Parsed::Bound(matches))
}

fn requests_help(registry: &Registry, tokens: &[Token<'_>]) -> bool {
    tokens
        .iter()
        .any(|t| matches!(t.resolve(registry), Some(Lookup::Help)))
}

struct Binder<'r> {
    registry: &'r Registry,
    matches: Matches,
    cursor: usize,
}

impl<'r> Binder<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            matches: Matches::default(),
            cursor: 0,
        }
    }

    fn run(mut self, tokens: &[Token<'_>]) -> Result<Matches, ParseError> {
        let mut i = 0usize;
        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            match *token {
                Token::Malformed(raw) => {
                    return Err(ParseError::MalformedToken {
                        token: raw.to_string(),
                    });
                }
                Token::Positional(raw) => self.bind_positional(raw)?,
                Token::Short { .. } | Token::Long { .. } => {
                    let Some(Lookup::Spec(spec)) = token.resolve(self.registry) else {
                        return Err(ParseError::UnknownOption {
                            option: token.to_string(),
                        });
                    };
                    let (ty, append) = match spec.kind() {
                        OptionKind::Boolean => {
                            if let Some(raw) = token.inline() {
                                return Err(ParseError::InvalidValue {
                                    target: token.to_string(),
                                    raw: raw.to_string(),
                                    reason: "flag does not take a value".to_string(),
                                });
                            }
                            self.matches.bind(spec.name(), Value::Bool(true));
                            self.matches.mark_explicit(spec.name());
                            continue;
                        }
                        OptionKind::Scalar(ty) => (ty, false),
                        OptionKind::Vector(ty) => (ty, true),
                    };
                    let assignment = self.registry.settings().assignment;
                    let raw = match (token.inline(), assignment, tokens.get(i)) {
                        (Some(raw), _, _) => raw,
                        (None, Assignment::SpaceOrEquals, Some(Token::Positional(raw))) => {
                            i += 1;
                            *raw
                        }
                        (None, _, _) => {
                            return Err(ParseError::MissingValue {
                                option: token.to_string(),
                            });
                        }
                    };
                    let value = ty.convert(raw).map_err(|reason| ParseError::InvalidValue {
                        target: token.to_string(),
                        raw: raw.to_string(),
                        reason,
                    })?;
                    if append {
                        self.matches.append(spec.name(), value);
                    } else {
                        self.matches.bind(spec.name(), value);
                    }
                    self.matches.mark_explicit(spec.name());
                }
            }
        }

        self.finish()
    }

    fn bind_positional(&mut self, raw: &str) -> Result<(), ParseError> {
        let Some(spec) = self.registry.positionals().get(self.cursor) else {
            return Err(ParseError::TooManyPositionals {
                token: raw.to_string(),
            });
        };
        let value = spec
            .value_type()
            .convert(raw)
            .map_err(|reason| ParseError::InvalidValue {
                target: spec.display_name(),
                raw: raw.to_string(),
                reason,
            })?;
        if spec.is_variadic() {
            self.matches.append(spec.name(), value);
        } else {
            self.matches.bind(spec.name(), value);
            self.cursor += 1;
        }
        self.matches.mark_explicit(spec.name());
        Ok(())
    }

    fn finish(mut self) -> Result<Matches, ParseError> {
        for spec in self.registry.options() {
            if self.matches.contains(spec.name()) {
                continue;
            }
            match (spec.kind(), spec.default()) {
                (_, Some(default)) => self.matches.bind(spec.name(), default.clone()),
                (OptionKind::Boolean, None) => {
                    self.matches.bind(spec.name(), Value::Bool(false));
                }
                (OptionKind::Vector(_), None) => {
                    self.matches.bind(spec.name(), Value::List(Vec::new()));
                }
                (OptionKind::Scalar(ty), None) if spec.is_required() => {
                    let name = match spec.short_name() {
                        Some(short) => format!("-{short}"),
                        None => spec.display_name(),
                    };
                    return Err(ParseError::MissingRequired {
                        target: format!("{name} <{}>", ty.placeholder()),
                    });
                }
                (OptionKind::Scalar(_), None) => {}
            }
        }

        for spec in self.registry.positionals() {
            if self.matches.contains(spec.name()) {
                continue;
            }
            if let Some(default) = spec.default() {
                self.matches.bind(spec.name(), default.clone());
            } else if spec.is_variadic() {
                self.matches.bind(spec.name(), Value::List(Vec::new()));
            } else if spec.is_required() {
                return Err(ParseError::MissingRequired {
                    target: spec.display_name(),
                });
            }
        }

        Ok(self.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::{Parsed, parse};
    use crate::error::{ErrorKind, ParseError};
    use crate::registry::{Assignment, OptionSpec, PositionalSpec, Registry};
    use crate::value::{Value, ValueType};

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn basic() -> Registry {
        Registry::builder("basic")
            .option(OptionSpec::scalar("x", ValueType::Int).short('x').long("x"))
            .option(OptionSpec::scalar("y", ValueType::Int).short('y').long("y"))
            .build()
            .unwrap()
    }

    fn positional() -> Registry {
        Registry::builder("positional")
            .positional(PositionalSpec::new("x", ValueType::Int))
            .positional(PositionalSpec::new("y", ValueType::Int).default_value(0))
            .build()
            .unwrap()
    }

    fn vector() -> Registry {
        Registry::builder("vector_positional")
            .option(OptionSpec::flag("o").short('o'))
            .option(OptionSpec::flag("s").short('s'))
            .positional(PositionalSpec::new("items", ValueType::Str).variadic())
            .build()
            .unwrap()
    }

    fn bound(registry: &Registry, args: &str) -> crate::Matches {
        match parse(registry, &argv(args)) {
            Ok(Parsed::Bound(m)) => m,
            other => panic!("expected Bound for {args:?}, got: {other:?}"),
        }
    }

    fn error_kind(registry: &Registry, args: &str) -> ErrorKind {
        match parse(registry, &argv(args)) {
            Err(err) => err.kind(),
            other => panic!("expected an error for {args:?}, got: {other:?}"),
        }
    }

    #[test]
    fn space_and_equals_forms_bind_the_same() {
        let registry = basic();
        let m = bound(&registry, "-x 3 -y 4");
        assert_eq!(m.get::<i64>("x"), Some(3));
        assert_eq!(m.get::<i64>("y"), Some(4));

        let m = bound(&registry, "-x=-3 -y=3");
        assert_eq!(m.get::<i64>("x"), Some(-3));
        assert_eq!(m.get::<i64>("y"), Some(3));

        let m = bound(&registry, "-x -3 --y 3");
        assert_eq!(m.get::<i64>("x"), Some(-3));
        assert_eq!(m.get::<i64>("y"), Some(3));
    }

    #[test]
    fn last_occurrence_wins() {
        let m = bound(&basic(), "-x 1 -y 2 -x 5");
        assert_eq!(m.get::<i64>("x"), Some(5));
    }

    #[test]
    fn basic_failures() {
        let registry = basic();
        assert_eq!(error_kind(&registry, ""), ErrorKind::MissingRequired);
        assert_eq!(error_kind(&registry, "-x 3"), ErrorKind::MissingRequired);
        assert_eq!(error_kind(&registry, "-y 4"), ErrorKind::MissingRequired);
        assert_eq!(error_kind(&registry, "-x test"), ErrorKind::InvalidValue);
        assert_eq!(error_kind(&registry, "-x"), ErrorKind::MissingValue);
        assert_eq!(error_kind(&registry, "--undefined 0"), ErrorKind::UnknownOption);
    }

    #[test]
    fn missing_value_when_next_token_is_an_option() {
        assert_eq!(
            parse(&basic(), &argv("-x -y 4")).unwrap_err(),
            ParseError::MissingValue {
                option: "-x".to_string()
            }
        );
    }

    #[test]
    fn help_wins_over_every_error() {
        let registry = basic();
        for args in ["-h", "--help", "-x 0 -h", "-h --undefined", "--=x -h", "-x test --help"] {
            match parse(&registry, &argv(args)) {
                Ok(Parsed::Help(text)) => assert!(!text.is_empty()),
                other => panic!("expected Help for {args:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn help_inside_a_bundle_is_detected() {
        let registry = vector();
        assert!(matches!(parse(&registry, &argv("-oh")), Ok(Parsed::Help(_))));
    }

    #[test]
    fn help_after_separator_is_positional() {
        let m = bound(&vector(), "-- -h");
        assert_eq!(m.get::<Vec<String>>("items"), Some(vec!["-h".to_string()]));
    }

    #[test]
    fn first_error_in_token_order_is_reported() {
        let err = parse(&basic(), &argv("--nope -x test")).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                option: "--nope".to_string()
            }
        );
        let err = parse(&basic(), &argv("-x test --nope")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn positional_binding_and_defaults() {
        let registry = positional();
        let m = bound(&registry, "2");
        assert_eq!(m.get::<i64>("x"), Some(2));
        assert_eq!(m.get::<i64>("y"), Some(0));
        assert!(!m.is_explicit("y"));

        let m = bound(&registry, "-1 -3");
        assert_eq!(m.get::<i64>("x"), Some(-1));
        assert_eq!(m.get::<i64>("y"), Some(-3));

        assert_eq!(error_kind(&registry, ""), ErrorKind::MissingRequired);
        assert_eq!(error_kind(&registry, "test"), ErrorKind::InvalidValue);
        assert_eq!(error_kind(&registry, "2 3 4"), ErrorKind::TooManyPositionals);
    }

    #[test]
    fn variadic_collects_interleaved_values_in_order() {
        let m = bound(&vector(), "b -o a -s c");
        assert_eq!(
            m.get::<Vec<String>>("items"),
            Some(vec!["b".to_string(), "a".to_string(), "c".to_string()])
        );
        assert!(m.flag("o"));
        assert!(m.flag("s"));
    }

    #[test]
    fn empty_variadic_binds_empty_list() {
        let m = bound(&vector(), "");
        assert_eq!(m.value("items"), Some(&Value::List(Vec::new())));
        assert!(!m.flag("o"));
    }

    #[test]
    fn flag_value_is_a_surplus_positional() {
        let registry = Registry::builder("flag")
            .option(OptionSpec::flag("a").short('a'))
            .option(OptionSpec::flag("b").short('b'))
            .build()
            .unwrap();
        assert_eq!(error_kind(&registry, "-a 1"), ErrorKind::TooManyPositionals);
        assert_eq!(error_kind(&registry, "-a=1"), ErrorKind::InvalidValue);
        let m = bound(&registry, "");
        assert!(!m.flag("a") && !m.flag("b"));
    }

    #[test]
    fn optional_scalar_stays_absent() {
        let registry = Registry::builder("optional_and_default")
            .option(OptionSpec::scalar("optional", ValueType::Int).long("optional").optional())
            .option(
                OptionSpec::scalar("default", ValueType::Int)
                    .long("default")
                    .default_value(0),
            )
            .build()
            .unwrap();
        let m = bound(&registry, "");
        assert!(!m.contains("optional"));
        assert_eq!(m.get::<i64>("default"), Some(0));
        assert!(!m.is_explicit("default"));

        let m = bound(&registry, "--default 1");
        assert!(m.is_explicit("default"));
        assert_eq!(m.get::<i64>("default"), Some(1));
    }

    #[test]
    fn vector_option_accumulates_occurrences() {
        let registry = Registry::builder("prog")
            .option(OptionSpec::vector("include", ValueType::Str).short('I').long("include"))
            .build()
            .unwrap();
        let m = bound(&registry, "-I a --include=b -Ic");
        assert_eq!(
            m.get::<Vec<String>>("include"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        let m = bound(&registry, "");
        assert_eq!(m.get::<Vec<String>>("include"), Some(Vec::new()));
    }

    #[test]
    fn equals_only_never_consumes_the_next_token() {
        let registry = Registry::builder("prog")
            .assignment(Assignment::EqualsOnly)
            .option(OptionSpec::scalar("i", ValueType::Int).short('i'))
            .positional(PositionalSpec::new("n", ValueType::Int).optional())
            .build()
            .unwrap();
        let m = bound(&registry, "-i=3 4");
        assert_eq!(m.get::<i64>("i"), Some(3));
        assert_eq!(m.get::<i64>("n"), Some(4));
        assert_eq!(error_kind(&registry, "-i 3"), ErrorKind::MissingValue);
    }

    #[test]
    fn malformed_token_is_reported() {
        assert_eq!(error_kind(&basic(), "--=3"), ErrorKind::MalformedToken);
    }

    #[test]
    fn missing_required_names_the_option() {
        let err = parse(&basic(), &argv("-x 1")).unwrap_err();
        assert_eq!(err.to_string(), "missing required argument: -y <INT>");
        let err = parse(&positional(), &argv("")).unwrap_err();
        assert_eq!(err.to_string(), "missing required argument: <x>");
    }
}
