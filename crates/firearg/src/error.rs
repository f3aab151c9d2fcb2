use thiserror::Error;

/// Kind of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    UnknownOption,
    MissingValue,
    InvalidValue,
    MissingRequired,
    TooManyPositionals,
}

/// Error produced while binding argv against a registry.
///
/// Every variant is terminal for the current parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed argument '{token}'")]
    MalformedToken { token: String },

    #[error("unknown option '{option}'")]
    UnknownOption { option: String },

    #[error("missing value for '{option}'")]
    MissingValue { option: String },

    #[error("invalid value '{raw}' for '{target}': {reason}")]
    InvalidValue {
        target: String,
        raw: String,
        reason: String,
    },

    #[error("missing required argument: {target}")]
    MissingRequired { target: String },

    #[error("unexpected argument '{token}'")]
    TooManyPositionals { token: String },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedToken { .. } => ErrorKind::MalformedToken,
            Self::UnknownOption { .. } => ErrorKind::UnknownOption,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::TooManyPositionals { .. } => ErrorKind::TooManyPositionals,
        }
    }
}

/// Error raised while declaring a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("'{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("option '{name}' has neither a short nor a long name")]
    Unnamed { name: String },

    #[error("'{short}' cannot be used as a short option name")]
    InvalidShort { short: char },

    #[error("'{long}' cannot be used as a long option name")]
    InvalidLong { long: String },

    #[error("default value for '{name}' is not {expected}")]
    DefaultTypeMismatch { name: String, expected: String },

    #[error("positional '{name}' is declared after variadic positional '{variadic}'")]
    PositionalAfterVariadic { name: String, variadic: String },

    #[error("required positional '{name}' follows optional positional '{optional}'")]
    RequiredAfterOptional { name: String, optional: String },
}

/// Error raised by typed accessors on [`crate::Matches`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no value bound for '{name}'")]
    Absent { name: String },

    #[error("'{name}' holds {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
