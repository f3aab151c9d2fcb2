//! Typed values produced by the binder.

use std::fmt;

/// Declared type of a valued option or positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    UInt,
    Float,
    Str,
}

impl ValueType {
    /// Placeholder used in help text and diagnostics.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::UInt => "UINT",
            Self::Float => "REAL",
            Self::Str => "TEXT",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Int => "an integer",
            Self::UInt => "a non-negative integer",
            Self::Float => "a real number",
            Self::Str => "text",
        }
    }

    /// Convert raw argv text into a value of this type.
    ///
    /// The error is a short reason suitable for `ParseError::InvalidValue`.
    pub fn convert(self, raw: &str) -> Result<Value, String> {
        let expected = || format!("expected {}", self.describe());
        match self {
            Self::Int => raw.parse().map(Value::Int).map_err(|_| expected()),
            Self::UInt => raw.parse().map(Value::UInt).map_err(|_| expected()),
            Self::Float => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Value::Float(v)),
                _ => Err(expected()),
            },
            Self::Str => Ok(Value::Str(raw.to_string())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// A bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Whether this is a scalar of `ty`.
    pub fn is_of(&self, ty: ValueType) -> bool {
        matches!(
            (self, ty),
            (Self::Int(_), ValueType::Int)
                | (Self::UInt(_), ValueType::UInt)
                | (Self::Float(_), ValueType::Float)
                | (Self::Str(_), ValueType::Str)
        )
    }

    /// Whether this is a list whose every element is of `ty`.
    pub fn is_list_of(&self, ty: ValueType) -> bool {
        match self {
            Self::List(items) => items.iter().all(|v| v.is_of(ty)),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Extraction of a Rust type from a bound [`Value`].
pub trait FromValue: Sized {
    /// Name of the expected variant, reported on mismatch.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "uint";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FromValue, Value, ValueType};

    #[test]
    fn int_accepts_negative_and_rejects_text() {
        assert_eq!(ValueType::Int.convert("-3"), Ok(Value::Int(-3)));
        assert!(ValueType::Int.convert("test").is_err());
        assert!(ValueType::Int.convert("1.5").is_err());
    }

    #[test]
    fn uint_rejects_negative() {
        assert_eq!(ValueType::UInt.convert("7"), Ok(Value::UInt(7)));
        let err = ValueType::UInt.convert("-1").unwrap_err();
        assert_eq!(err, "expected a non-negative integer");
    }

    #[test]
    fn float_rejects_non_finite() {
        assert_eq!(ValueType::Float.convert("2.5"), Ok(Value::Float(2.5)));
        assert!(ValueType::Float.convert("inf").is_err());
        assert!(ValueType::Float.convert("NaN").is_err());
    }

    #[test]
    fn list_display_is_space_joined() {
        let v = Value::from(vec!["b", "a"]);
        assert_eq!(v.to_string(), "b a");
        assert!(v.is_list_of(ValueType::Str));
        assert!(!v.is_list_of(ValueType::Int));
    }

    #[test]
    fn from_value_is_strict_about_variants() {
        assert_eq!(i64::from_value(&Value::Int(4)), Some(4));
        assert_eq!(i64::from_value(&Value::UInt(4)), None);
        assert_eq!(
            Vec::<String>::from_value(&Value::from(vec!["x", "y"])),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(Vec::<i64>::from_value(&Value::from(vec!["x"])), None);
    }
}
