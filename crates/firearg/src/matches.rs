use indexmap::{IndexMap, IndexSet};

use crate::error::MatchError;
use crate::value::{FromValue, Value};

/// Values bound by a successful parse, keyed by spec name.
///
/// Holds every declared spec that received a value, either from argv or from
/// its default. Read-only once returned by the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    values: IndexMap<String, Value>,
    explicit: IndexSet<String>,
}

impl Matches {
    /// The bound value, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The bound value converted to `T`. `None` when absent or of another type.
    pub fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        self.values.get(name).and_then(T::from_value)
    }

    /// Like [`get`](Self::get), but reports why no value could be produced.
    pub fn require<T: FromValue>(&self, name: &str) -> Result<T, MatchError> {
        let value = self.values.get(name).ok_or_else(|| MatchError::Absent {
            name: name.to_string(),
        })?;
        T::from_value(value).ok_or_else(|| MatchError::TypeMismatch {
            name: name.to_string(),
            expected: T::EXPECTED,
            found: value.type_name(),
        })
    }

    /// Whether a Boolean option is set.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    /// Whether a value is bound (explicitly or via default).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether the spec was given on the command line.
    ///
    /// Values sourced from defaults do not count.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Bound values in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Matches {
    /// Bind `value`, replacing any earlier one.
    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Append `value` to the list bound under `name`.
    pub(crate) fn append(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(Value::List(items)) => items.push(value),
            _ => {
                self.values.insert(name.to_string(), Value::List(vec![value]));
            }
        }
    }

    pub(crate) fn mark_explicit(&mut self, name: &str) {
        self.explicit.insert(name.to_string());
    }
}
