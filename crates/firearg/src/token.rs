//! Token classification.
//!
//! Turns raw argv into option and positional tokens. Nothing is validated here
//! beyond token structure: unknown options are still emitted and rejected later
//! by the binder, after the help scan has had a chance to run.

use std::fmt;

use tracing::trace;

use crate::registry::{Lookup, Registry};

/// A classified argv token. Borrows from the argv it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Short { name: char, inline: Option<&'a str> },
    Long { name: &'a str, inline: Option<&'a str> },
    Positional(&'a str),
    Malformed(&'a str),
}

impl Token<'_> {
    pub fn inline(&self) -> Option<&str> {
        match self {
            Self::Short { inline, .. } | Self::Long { inline, .. } => *inline,
            Self::Positional(_) | Self::Malformed(_) => None,
        }
    }

    /// Resolve an option token; positional and malformed tokens resolve to nothing.
    pub fn resolve<'r>(&self, registry: &'r Registry) -> Option<Lookup<'r>> {
        match self {
            Self::Short { name, .. } => registry.lookup_short(*name),
            Self::Long { name, .. } => registry.lookup_long(name),
            Self::Positional(_) | Self::Malformed(_) => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    /// The option as written, without its inline value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short { name, .. } => write!(f, "-{name}"),
            Self::Long { name, .. } => write!(f, "--{name}"),
            Self::Positional(raw) | Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Classify `argv` (program name excluded).
///
/// - `--name` / `--name=value` is a long option; `--=value` is malformed.
/// - `--` ends option parsing; it is not emitted itself.
/// - `-` and `-<digit>...` are positional, so negative numbers never look like options.
/// - `-x=value` is a single short option with an inline value.
/// - `-xyz` is expanded into `-x -y -z`; a character naming a valued option
///   takes the rest of the token as its inline value.
pub fn classify<'a>(argv: &'a [String], registry: &Registry) -> Vec<Token<'a>> {
    let mut tokens = Vec::with_capacity(argv.len());
    let mut options_done = false;

    for arg in argv {
        let arg = arg.as_str();
        if options_done {
            tokens.push(Token::Positional(arg));
            continue;
        }
        if arg == "--" {
            options_done = true;
            continue;
        }
        if let Some(body) = arg.strip_prefix("--") {
            tokens.push(classify_long(arg, body));
            continue;
        }
        if let Some(body) = arg.strip_prefix('-') {
            classify_short(arg, body, registry, &mut tokens);
            continue;
        }
        tokens.push(Token::Positional(arg));
    }

    trace!(?tokens, "classified argv");
    tokens
}

fn classify_long<'a>(arg: &'a str, body: &'a str) -> Token<'a> {
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    if name.is_empty() {
        Token::Malformed(arg)
    } else {
        Token::Long { name, inline }
    }
}

fn classify_short<'a>(arg: &'a str, body: &'a str, registry: &Registry, out: &mut Vec<Token<'a>>) {
    let Some(first) = body.chars().next() else {
        // A lone `-` conventionally names stdin/stdout.
        out.push(Token::Positional(arg));
        return;
    };
    if first.is_ascii_digit() {
        out.push(Token::Positional(arg));
        return;
    }
    if first == '=' {
        out.push(Token::Malformed(arg));
        return;
    }

    if let Some((name, value)) = body.split_once('=') {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(name), None) => out.push(Token::Short {
                name,
                inline: Some(value),
            }),
            _ => out.push(Token::Malformed(arg)),
        }
        return;
    }

    for (offset, name) in body.char_indices() {
        let takes_value = matches!(
            registry.lookup_short(name),
            Some(Lookup::Spec(spec)) if spec.takes_value()
        );
        if takes_value {
            let rest = &body[offset + name.len_utf8()..];
            out.push(Token::Short {
                name,
                inline: (!rest.is_empty()).then_some(rest),
            });
            return;
        }
        out.push(Token::Short { name, inline: None });
    }
}
