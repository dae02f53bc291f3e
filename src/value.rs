#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::Table;
use std::fmt;

/// A parsed value.
///
/// The variant of a value is fixed when it is created. Cloning a value
/// deep-copies it, dropping it releases every string and nested table it
/// owns.
///
/// # Examples
///
/// ```
/// let table = toml_tree::parse("x = 42\nname = \"toml\"")?;
/// assert_eq!(table.get("x").and_then(|v| v.as_integer()), Some(42));
/// assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("toml"));
/// assert!(table.get("missing").is_none());
/// # Ok::<(), toml_tree::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A boolean.
    Boolean(bool),
    /// An ordered sequence of values of any type.
    Array(Vec<Value>),
    /// A nested table.
    Table(Table),
}

impl Value {
    /// Returns the type name (e.g. `"string"`, `"integer"`, `"table"`).
    #[inline]
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::String(..) => "string",
            Value::Integer(..) => "integer",
            Value::Boolean(..) => "boolean",
            Value::Array(..) => "array",
            Value::Table(..) => "table",
        }
    }

    /// Returns a borrowed string if this is a string value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns an `i64` if this is an integer value.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a `bool` if this is a boolean value.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is an array value.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a borrowed table if this is a table value.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable table reference if this is a table value.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns `true` for table values.
    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(..))
    }

    /// Converts into the owned table, or gives the value back unchanged.
    pub fn into_table(self) -> Result<Table, Value> {
        match self {
            Value::Table(t) => Ok(t),
            other => Err(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => s.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Boolean(b) => b.fmt(f),
            Value::Array(a) => f.debug_list().entries(a).finish(),
            Value::Table(t) => t.fmt(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
